mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{AppPaths, PanelApp, StartupConfig};

#[derive(Parser, Debug)]
struct Args {
    /// Directory holding the panel database. Defaults to the per-user data dir.
    #[arg(long)]
    data_dir: Option<std::path::PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    let startup = StartupConfig {
        data_dir: args.data_dir,
    };
    match AppPaths::resolve(&startup, &settings) {
        Ok(Some(paths)) => {
            tracing::info!(data_root = %paths.data_root.display(), "using panel data dir");
            settings.database_url = paths.database_url();
        }
        Ok(None) => {}
        Err(err) => tracing::warn!("keeping configured database url: {err:#}"),
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Practice Panel")
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([360.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Practice Panel",
        options,
        Box::new(|_cc| Ok(Box::new(PanelApp::new(cmd_tx, ui_rx)))),
    )
}
