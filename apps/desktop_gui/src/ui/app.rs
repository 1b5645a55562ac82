use std::path::PathBuf;

use client_core::{Settings, TriggerState, UsersView};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::EMAIL_FIELD;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

const DATABASE_FILE: &str = "panel.db";
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub db_path: PathBuf,
}

impl AppPaths {
    /// `None` when the database url was configured explicitly and no data
    /// dir was given on the command line.
    pub fn resolve(startup: &StartupConfig, settings: &Settings) -> anyhow::Result<Option<Self>> {
        let root = match &startup.data_dir {
            Some(dir) => dir.clone(),
            None if settings.database_url == Settings::default().database_url => {
                let base = dirs::data_local_dir()
                    .ok_or_else(|| anyhow::anyhow!("unable to resolve local app data dir"))?;
                base.join("practice_panel")
            }
            None => return Ok(None),
        };

        Ok(Some(Self {
            db_path: root.join(DATABASE_FILE),
            data_root: root,
        }))
    }

    pub fn database_url(&self) -> String {
        format!(
            "sqlite://{}",
            self.db_path.to_string_lossy().replace('\\', "/")
        )
    }
}

/// Everything the panel draws, rebuilt only from backend events and local
/// form edits.
#[derive(Debug, Clone)]
pub struct PanelState {
    pub dark_mode: bool,
    pub count: i64,
    pub trigger: TriggerState,
    pub users: Option<UsersView>,
    pub invalid_notice: Option<String>,
    pub form_name: String,
    pub form_email: String,
    pub status: String,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            dark_mode: false,
            count: 0,
            trigger: TriggerState::idle(),
            users: None,
            invalid_notice: None,
            form_name: String::new(),
            form_email: String::new(),
            status: String::new(),
        }
    }
}

impl PanelState {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::DarkModeApplied(enabled) => self.dark_mode = enabled,
            UiEvent::CountChanged(value) => self.count = value,
            UiEvent::TriggerChanged(trigger) => self.trigger = trigger,
            UiEvent::UsersReplaced(view) => self.users = Some(view),
            UiEvent::InvalidSubmission(message) => self.invalid_notice = Some(message),
            UiEvent::FormReset => {
                self.form_name.clear();
                self.form_email.clear();
                self.invalid_notice = None;
            }
            UiEvent::Info(message) => self.status = message,
            UiEvent::Error(message) => self.status = format!("Error: {message}"),
        }
    }

    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("name".to_string(), self.form_name.clone()),
            (EMAIL_FIELD.to_string(), self.form_email.clone()),
        ]
    }
}

pub fn theme_toggle_label(dark_mode: bool) -> &'static str {
    if dark_mode {
        "Light mode"
    } else {
        "Dark mode"
    }
}

pub struct PanelApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: PanelState,
    applied_dark_mode: Option<bool>,
}

impl PanelApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: PanelState::default(),
            applied_dark_mode: None,
        }
    }

    fn queue(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.apply(event);
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_dark_mode == Some(self.state.dark_mode) {
            return;
        }
        let visuals = if self.state.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);
        self.applied_dark_mode = Some(self.state.dark_mode);
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Practice Panel");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(theme_toggle_label(self.state.dark_mode))
                        .clicked()
                    {
                        self.queue(BackendCommand::ToggleTheme);
                    }
                });
            });
        });
    }

    fn show_counter(&mut self, ui: &mut egui::Ui) {
        ui.heading("Counter");
        ui.horizontal(|ui| {
            if ui.button("-").clicked() {
                self.queue(BackendCommand::Decrement);
            }
            ui.monospace(self.state.count.to_string());
            if ui.button("+").clicked() {
                self.queue(BackendCommand::Increment);
            }
        });
    }

    fn show_users(&mut self, ui: &mut egui::Ui) {
        ui.heading("Users");
        let trigger = egui::Button::new(self.state.trigger.label.as_str());
        if ui.add_enabled(self.state.trigger.enabled, trigger).clicked() {
            self.queue(BackendCommand::LoadUsers);
        }

        egui::ScrollArea::vertical()
            .max_height(240.0)
            .auto_shrink([false, true])
            .show(ui, |ui| match &self.state.users {
                Some(UsersView::Users(users)) => {
                    for user in users {
                        ui.strong(&user.name);
                        ui.label(format!("Email: {}", user.email));
                        ui.add_space(4.0);
                    }
                }
                Some(UsersView::Error(line)) => {
                    ui.colored_label(ERROR_COLOR, line);
                }
                None => {
                    ui.weak("No users loaded");
                }
            });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Demo form");
        ui.add(egui::TextEdit::singleline(&mut self.state.form_name).hint_text("Name"));
        ui.add(egui::TextEdit::singleline(&mut self.state.form_email).hint_text("Email"));
        if ui.button("Submit").clicked() {
            self.state.invalid_notice = None;
            let fields = self.state.form_fields();
            self.queue(BackendCommand::SubmitForm { fields });
        }
        if let Some(notice) = &self.state.invalid_notice {
            ui.colored_label(ERROR_COLOR, notice);
        }
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        self.show_header(ctx);
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.small(self.state.status.as_str());
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_counter(ui);
            ui.separator();
            self.show_users(ui);
            ui.separator();
            self.show_form(ui);
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
