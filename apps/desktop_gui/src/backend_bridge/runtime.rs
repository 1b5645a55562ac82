//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{AppContext, AppController, Dispatched, Renderer, Settings, SubmitOutcome};
use crossbeam_channel::{Receiver, Sender};
use storage::{KeyValueStore, MemoryStore, Storage};

use crate::backend_bridge::{commands::BackendCommand, renderer::ChannelRenderer};
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let store = open_store(&settings.database_url, &ui_tx).await;
            let renderer: Arc<dyn Renderer> = Arc::new(ChannelRenderer::new(ui_tx.clone()));
            let ctx = match AppContext::from_settings(&settings, renderer, store) {
                Ok(ctx) => ctx,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(format!(
                        "backend worker startup failure: {err:#}"
                    )));
                    tracing::error!("failed to prepare panel controller: {err:#}");
                    return;
                }
            };

            let mut controller = AppController::start(ctx).await;
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                let name = cmd.name();
                match controller.dispatch(cmd.into_action()).await {
                    Dispatched::Fetching(_task) => {
                        tracing::debug!(command = name, "users fetch in flight")
                    }
                    Dispatched::Submitted(SubmitOutcome::Accepted(submission)) => {
                        let _ = ui_tx.try_send(UiEvent::Info(format!(
                            "Form accepted ({} fields)",
                            submission.len()
                        )));
                    }
                    Dispatched::Unbound(control) => {
                        tracing::debug!(command = name, control = control.label(), "no handler")
                    }
                    Dispatched::Submitted(SubmitOutcome::Rejected { .. }) | Dispatched::Handled => {}
                }
            }
            tracing::info!("ui closed; backend worker stopping");
        });
    });
}

/// Falls back to a process-local store when the database cannot be opened;
/// the panel keeps working without persistence.
async fn open_store(database_url: &str, ui_tx: &Sender<UiEvent>) -> Arc<dyn KeyValueStore> {
    match Storage::new(database_url).await {
        Ok(storage) => {
            tracing::info!(database_url, "opened panel storage");
            Arc::new(storage)
        }
        Err(err) => {
            tracing::warn!("storage unavailable, settings will not persist: {err:#}");
            let _ = ui_tx.try_send(UiEvent::Info(
                "Storage unavailable; theme changes will not persist".to_string(),
            ));
            Arc::new(MemoryStore::new())
        }
    }
}
