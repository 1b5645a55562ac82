use std::collections::BTreeSet;

use client_core::{Control, Renderer, TriggerState, UsersView};
use crossbeam_channel::{Sender, TrySendError};

use crate::controller::events::UiEvent;

pub const ALL_CONTROLS: [Control; 7] = [
    Control::ThemeToggle,
    Control::CounterDisplay,
    Control::Increment,
    Control::Decrement,
    Control::LoadUsers,
    Control::UsersList,
    Control::DemoForm,
];

/// Renderer living on the backend worker. Every call becomes a `UiEvent` the
/// UI thread applies on its next frame. Most updates are dropped when the
/// queue is full; trigger changes wait for room so the button never stays
/// disabled.
pub struct ChannelRenderer {
    ui_tx: Sender<UiEvent>,
    controls: BTreeSet<Control>,
}

impl ChannelRenderer {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self::with_controls(ui_tx, ALL_CONTROLS)
    }

    pub fn with_controls(
        ui_tx: Sender<UiEvent>,
        controls: impl IntoIterator<Item = Control>,
    ) -> Self {
        Self {
            ui_tx,
            controls: controls.into_iter().collect(),
        }
    }

    fn send(&self, event: UiEvent) {
        match self.ui_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => tracing::warn!("ui event queue full; dropping update"),
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui thread gone; dropping update")
            }
        }
    }

    fn send_blocking(&self, event: UiEvent) {
        if self.ui_tx.send(event).is_err() {
            tracing::debug!("ui thread gone; dropping update");
        }
    }
}

impl Renderer for ChannelRenderer {
    fn has_control(&self, control: Control) -> bool {
        self.controls.contains(&control)
    }

    fn apply_dark_mode(&self, enabled: bool) {
        self.send(UiEvent::DarkModeApplied(enabled));
    }

    fn show_count(&self, value: i64) {
        self.send(UiEvent::CountChanged(value));
    }

    fn set_trigger(&self, trigger: &TriggerState) {
        self.send_blocking(UiEvent::TriggerChanged(trigger.clone()));
    }

    fn replace_users(&self, view: UsersView) {
        self.send(UiEvent::UsersReplaced(view));
    }

    fn show_invalid_submission(&self, message: &str) {
        self.send(UiEvent::InvalidSubmission(message.to_string()));
    }

    fn reset_form(&self) {
        self.send(UiEvent::FormReset);
    }
}
