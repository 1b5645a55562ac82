//! Renderer that prints every presentation update as a line of text.

use std::{
    collections::BTreeSet,
    io::{self, Write},
    sync::Mutex,
};

use client_core::{Control, Renderer, TriggerState, UsersView};

pub struct ConsoleRenderer {
    out: Mutex<Box<dyn Write + Send>>,
    controls: BTreeSet<Control>,
}

impl ConsoleRenderer {
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            // The console has no form-less or list-less layout; every control exists.
            controls: [
                Control::ThemeToggle,
                Control::CounterDisplay,
                Control::Increment,
                Control::Decrement,
                Control::LoadUsers,
                Control::UsersList,
                Control::DemoForm,
            ]
            .into_iter()
            .collect(),
        }
    }

    fn write_lines(&self, lines: &[String]) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        for line in lines {
            if let Err(err) = writeln!(out, "{line}") {
                tracing::debug!("console write failed: {err}");
                return;
            }
        }
        let _ = out.flush();
    }
}

pub fn users_lines(view: &UsersView) -> Vec<String> {
    match view {
        UsersView::Users(users) if users.is_empty() => vec!["(no users)".to_string()],
        UsersView::Users(users) => users
            .iter()
            .map(|user| format!("- {} <{}>", user.name, user.email))
            .collect(),
        UsersView::Error(line) => vec![format!("! {line}")],
    }
}

pub fn trigger_line(trigger: &TriggerState) -> String {
    if trigger.enabled {
        format!("[{}]", trigger.label)
    } else {
        format!("[{}] (disabled)", trigger.label)
    }
}

impl Renderer for ConsoleRenderer {
    fn has_control(&self, control: Control) -> bool {
        self.controls.contains(&control)
    }

    fn apply_dark_mode(&self, enabled: bool) {
        let mode = if enabled { "dark" } else { "light" };
        self.write_lines(&[format!("theme: {mode}")]);
    }

    fn show_count(&self, value: i64) {
        self.write_lines(&[format!("count: {value}")]);
    }

    fn set_trigger(&self, trigger: &TriggerState) {
        self.write_lines(&[trigger_line(trigger)]);
    }

    fn replace_users(&self, view: UsersView) {
        self.write_lines(&users_lines(&view));
    }

    fn show_invalid_submission(&self, message: &str) {
        self.write_lines(&[format!("invalid: {message}")]);
    }

    fn reset_form(&self) {
        self.write_lines(&["form cleared".to_string()]);
    }
}

/// In-memory output sink for tests that inspect what was printed.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct SharedBuf(std::sync::Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("buf lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl SharedBuf {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().expect("buf lock").clone()).expect("utf8")
    }
}
