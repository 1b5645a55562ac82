use super::*;
use crate::test_support::{as_renderer, RecordingRenderer, RenderCall};

#[test]
fn rejects_email_without_at_sign() {
    let renderer = RecordingRenderer::new();
    let validator = FormValidator::new(as_renderer(&renderer));
    let mut event = FormSubmitEvent::new([("email", "not-an-email")]);

    let outcome = validator.handle_submit(&mut event);

    assert!(!outcome.is_accepted());
    assert_eq!(outcome.reason(), Some("Please enter a valid email address"));
    assert!(event.default_prevented());
    assert_eq!(renderer.form_resets(), 0);
    assert_eq!(
        renderer.calls(),
        vec![RenderCall::Invalid(
            "Please enter a valid email address".to_string()
        )]
    );
}

#[test]
fn accepts_email_and_clears_form() {
    let renderer = RecordingRenderer::new();
    let validator = FormValidator::new(as_renderer(&renderer));
    let mut event = FormSubmitEvent::new([("name", "Ann"), ("email", "a@x.com")]);

    let outcome = validator.handle_submit(&mut event);

    match outcome {
        SubmitOutcome::Accepted(submission) => {
            assert_eq!(submission.get("email"), Some("a@x.com"));
            assert_eq!(submission.get("name"), Some("Ann"));
        }
        other => panic!("expected acceptance, got {other:?}"),
    }
    assert!(event.default_prevented());
    assert_eq!(renderer.calls(), vec![RenderCall::FormReset]);
}

#[test]
fn last_repeated_field_decides() {
    let renderer = RecordingRenderer::new();
    let validator = FormValidator::new(as_renderer(&renderer));
    let mut event = FormSubmitEvent::new([("email", "a@x.com"), ("email", "nope")]);

    let outcome = validator.handle_submit(&mut event);

    assert!(!outcome.is_accepted());
    assert_eq!(renderer.form_resets(), 0);
}

#[test]
fn form_without_email_field_is_rejected() {
    let renderer = RecordingRenderer::new();
    let validator = FormValidator::new(as_renderer(&renderer));
    let mut event = FormSubmitEvent::new([("name", "Ann")]);

    assert!(!validator.handle_submit(&mut event).is_accepted());
    assert!(event.default_prevented());
}
