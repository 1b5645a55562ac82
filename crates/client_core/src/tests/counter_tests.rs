use super::*;
use crate::test_support::{as_renderer, RecordingRenderer, RenderCall};

#[test]
fn increment_increment_decrement_shows_one() {
    let renderer = RecordingRenderer::new();
    let mut counter = Counter::new(as_renderer(&renderer));

    counter.increment();
    counter.increment();
    counter.decrement();

    assert_eq!(renderer.last_count(), Some(1));
}

#[test]
fn every_step_updates_the_display() {
    let renderer = RecordingRenderer::new();
    let mut counter = Counter::new(as_renderer(&renderer));

    counter.decrement();
    counter.decrement();
    counter.increment();

    assert_eq!(
        renderer.calls(),
        vec![
            RenderCall::Count(-1),
            RenderCall::Count(-2),
            RenderCall::Count(-1)
        ]
    );
}

#[test]
fn displayed_value_is_the_sum_of_steps() {
    let renderer = RecordingRenderer::new();
    let mut counter = Counter::new(as_renderer(&renderer));
    let steps = [1, 1, -1, -1, -1, 1, -1, -1, 1, 1, 1, 1];

    for step in steps {
        if step > 0 {
            counter.increment();
        } else {
            counter.decrement();
        }
    }

    assert_eq!(renderer.last_count(), Some(steps.iter().sum::<i64>()));
}

#[test]
fn fresh_counter_displays_zero_on_request() {
    let renderer = RecordingRenderer::new();
    let counter = Counter::new(as_renderer(&renderer));

    counter.update_display();

    assert_eq!(renderer.last_count(), Some(0));
}

#[test]
fn missing_display_is_never_written() {
    let renderer = RecordingRenderer::without(&[Control::CounterDisplay]);
    let mut counter = Counter::new(as_renderer(&renderer));

    counter.increment();

    assert!(renderer.calls().is_empty());
}

#[test]
fn increment_saturates_at_upper_limit() {
    let renderer = RecordingRenderer::new();
    let mut counter = Counter::new(as_renderer(&renderer));
    counter.count = i64::MAX;

    counter.increment();

    assert_eq!(renderer.last_count(), Some(i64::MAX));
}

#[test]
fn decrement_saturates_at_lower_limit() {
    let renderer = RecordingRenderer::new();
    let mut counter = Counter::new(as_renderer(&renderer));
    counter.count = i64::MIN;

    counter.decrement();
    counter.decrement();

    assert_eq!(renderer.last_count(), Some(i64::MIN));
}
