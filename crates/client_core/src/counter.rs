use std::sync::Arc;

use crate::surface::{Control, Renderer};

/// In-memory click counter. The value is private to the instance and every
/// change is pushed to the counter display straight away.
pub struct Counter {
    count: i64,
    renderer: Arc<dyn Renderer>,
}

impl Counter {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self { count: 0, renderer }
    }

    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
        self.update_display();
    }

    pub fn decrement(&mut self) {
        self.count = self.count.saturating_sub(1);
        self.update_display();
    }

    pub fn update_display(&self) {
        if self.renderer.has_control(Control::CounterDisplay) {
            self.renderer.show_count(self.count);
        }
    }
}

#[cfg(test)]
#[path = "tests/counter_tests.rs"]
mod tests;
