use std::cell::RefCell;
use std::future::Future;

use time::OffsetDateTime;

use super::*;
use crate::net::submit::status_outcome;

// =============================================================
// Helpers
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    Marker(FieldName, FieldMarker),
    SubmitEnabled(bool),
    Label(SubmitLabel),
    Counter(FieldName, Option<CharacterCount>),
    Show(Notification),
    Dismiss(u64),
    Focus(FieldName),
    ClearValues,
}

#[derive(Debug, Default)]
struct RecordingView {
    calls: Vec<Call>,
}

impl FormView for RecordingView {
    fn set_field_marker(&mut self, field: FieldName, marker: &FieldMarker) {
        self.calls.push(Call::Marker(field, marker.clone()));
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.calls.push(Call::SubmitEnabled(enabled));
    }

    fn set_submit_label(&mut self, label: SubmitLabel) {
        self.calls.push(Call::Label(label));
    }

    fn set_character_count(&mut self, field: FieldName, count: Option<CharacterCount>) {
        self.calls.push(Call::Counter(field, count));
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.calls.push(Call::Show(notification.clone()));
    }

    fn dismiss_notification(&mut self, id: u64) {
        self.calls.push(Call::Dismiss(id));
    }

    fn focus_field(&mut self, field: FieldName) {
        self.calls.push(Call::Focus(field));
    }

    fn clear_values(&mut self) {
        self.calls.push(Call::ClearValues);
    }
}

struct FakeTransport {
    /// `None` simulates a network failure.
    status: Option<u16>,
    posted: RefCell<Vec<Submission>>,
}

impl FakeTransport {
    fn responding(status: u16) -> Self {
        Self { status: Some(status), posted: RefCell::new(Vec::new()) }
    }

    fn unreachable() -> Self {
        Self { status: None, posted: RefCell::new(Vec::new()) }
    }
}

impl Transport for FakeTransport {
    fn post(&self, submission: &Submission) -> impl Future<Output = Result<(), SubmitError>> {
        self.posted.borrow_mut().push(submission.clone());
        let outcome = match self.status {
            Some(status) => status_outcome(status, String::new),
            None => Err(SubmitError::Transport("connection refused".to_owned())),
        };
        std::future::ready(outcome)
    }
}

#[derive(Default)]
struct RecordingTimer {
    sleeps: RefCell<Vec<u32>>,
}

impl Timer for RecordingTimer {
    fn sleep(&self, ms: u32) -> impl Future<Output = ()> {
        self.sleeps.borrow_mut().push(ms);
        std::future::ready(())
    }
}

fn controller() -> FormController<RecordingView> {
    FormController::new(RecordingView::default(), RuleTable::contact().unwrap(), FormConfig::default())
}

fn fill(form: &mut FormController<RecordingView>, name: &str, email: &str, subject: &str, message: &str) {
    form.on_input(FieldName::Name, name);
    form.on_input(FieldName::Email, email);
    form.on_input(FieldName::Subject, subject);
    form.on_input(FieldName::Message, message);
}

fn fill_valid(form: &mut FormController<RecordingView>) {
    fill(form, " Ada Lovelace ", "ada@example.com", "Collaboration", "I would like to work with you on a project.");
}

fn calls(form: &FormController<RecordingView>) -> &[Call] {
    &form.view().calls
}

fn shown_messages(form: &FormController<RecordingView>) -> Vec<String> {
    calls(form)
        .iter()
        .filter_map(|call| match call {
            Call::Show(n) => Some(n.message.clone()),
            _ => None,
        })
        .collect()
}

fn now() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

// =============================================================
// Initial state and input
// =============================================================

#[test]
fn new_controller_starts_idle_with_submit_disabled() {
    let form = controller();
    assert_eq!(form.state(), SubmissionState::Idle);
    assert!(!form.is_submit_enabled());
    assert!(!form.is_in_flight());
    assert_eq!(calls(&form), [Call::SubmitEnabled(false)]);
}

#[test]
fn input_updates_counter_only_for_length_limited_fields() {
    let mut form = controller();
    form.on_input(FieldName::Email, "a@b.com");
    form.on_input(FieldName::Name, "Al");
    assert_eq!(
        calls(&form)[1..],
        [Call::Counter(FieldName::Name, Some(CharacterCount { current: 2, max: 50 }))]
    );
    assert_eq!(form.state(), SubmissionState::Validating);
}

#[test]
fn input_with_same_value_does_not_repush_counter() {
    let mut form = controller();
    form.on_input(FieldName::Subject, "Hello");
    let before = calls(&form).len();
    form.on_input(FieldName::Subject, "Hello");
    assert_eq!(calls(&form).len(), before);
}

#[test]
fn input_does_not_touch_markers() {
    let mut form = controller();
    form.on_input(FieldName::Name, "1");
    assert!(!calls(&form).iter().any(|call| matches!(call, Call::Marker(..))));
}

// =============================================================
// Aggregate validation
// =============================================================

#[test]
fn short_message_keeps_submit_disabled() {
    let mut form = controller();
    fill(&mut form, "Al", "a@b.com", "Hi there", "short");
    assert!(!form.validate_all());
    assert!(!form.is_submit_enabled());
    assert_eq!(form.field(FieldName::Message).error, "Message must be at least 10 characters");
    assert!(calls(&form).contains(&Call::Marker(
        FieldName::Message,
        FieldMarker::Error("Message must be at least 10 characters".to_owned())
    )));
    assert!(calls(&form).contains(&Call::Marker(FieldName::Name, FieldMarker::Success)));
    assert_eq!(form.state(), SubmissionState::Validating);
}

#[test]
fn all_valid_enables_submit_and_returns_to_idle() {
    let mut form = controller();
    fill_valid(&mut form);
    assert!(form.validate_all());
    assert!(form.is_submit_enabled());
    let enables = calls(&form).iter().filter(|call| **call == Call::SubmitEnabled(true)).count();
    assert_eq!(enables, 1);
    assert_eq!(form.state(), SubmissionState::Idle);
}

#[test]
fn empty_form_shows_required_messages() {
    let mut form = controller();
    assert!(!form.on_blur(FieldName::Name));
    for field in FieldName::ALL {
        assert!(!form.field(field).valid);
    }
    assert_eq!(form.field(FieldName::Email).error, "Please enter your email");
}

#[test]
fn repeated_validate_all_is_idempotent() {
    let mut form = controller();
    fill(&mut form, "Al", "bad", "Hi there", "short");
    form.validate_all();
    let after_first = calls(&form).len();
    form.validate_all();
    form.validate_all();
    assert_eq!(calls(&form).len(), after_first);
}

#[test]
fn fixing_a_field_swaps_error_for_success() {
    let mut form = controller();
    fill(&mut form, "Al", "a@b.com", "Hi there", "short");
    form.validate_all();
    form.on_input(FieldName::Message, "Long enough message now");
    assert!(form.on_blur(FieldName::Message));
    assert_eq!(calls(&form).last(), Some(&Call::Marker(FieldName::Message, FieldMarker::Success)));
    assert!(form.is_submit_enabled());
}

#[test]
fn clearing_a_field_disables_submit_again() {
    let mut form = controller();
    fill_valid(&mut form);
    form.validate_all();
    form.on_input(FieldName::Email, "");
    assert!(!form.on_blur(FieldName::Email));
    assert!(!form.is_submit_enabled());
}

#[test]
fn typing_an_invalid_value_disables_submit_before_blur() {
    let mut form = controller();
    fill_valid(&mut form);
    assert!(form.validate_all());
    assert!(form.is_submit_enabled());

    form.on_input(FieldName::Message, "");
    assert!(!form.validate_field(FieldName::Message).is_valid);
    assert!(!form.is_submit_enabled());
    assert_eq!(calls(&form).last(), Some(&Call::SubmitEnabled(false)));
    // The marker still shows the last blur's verdict.
    assert!(!calls(&form).contains(&Call::Marker(
        FieldName::Message,
        FieldMarker::Error("Please enter your message".to_owned())
    )));
}

#[test]
fn typing_the_last_missing_value_enables_submit() {
    let mut form = controller();
    fill(&mut form, "Ada", "ada@b.com", "Hello there", "");
    assert!(!form.is_submit_enabled());
    form.on_input(FieldName::Message, "A long enough message");
    assert!(form.is_submit_enabled());
}

#[test]
fn typing_during_a_pending_submission_keeps_submit_disabled() {
    let mut form = controller();
    fill_valid(&mut form);
    assert!(form.begin_submit(now()).is_ok());
    form.on_input(FieldName::Subject, "Another subject");
    assert!(!form.is_submit_enabled());
}

// =============================================================
// begin_submit
// =============================================================

#[test]
fn invalid_submit_notifies_and_focuses_first_invalid() {
    let mut form = controller();
    fill(&mut form, "Al", "nope", "Hi there", "short");
    let blocked = form.begin_submit(now()).unwrap_err();
    match blocked {
        SubmitBlocked::Invalid { first_invalid, notification } => {
            assert_eq!(first_invalid, Some(FieldName::Email));
            assert_eq!(form.active_notification(), Some(notification));
        }
        SubmitBlocked::InFlight => panic!("expected invalid"),
    }
    assert!(calls(&form).contains(&Call::Focus(FieldName::Email)));
    assert_eq!(shown_messages(&form), ["Please correct the errors above before submitting."]);
    assert!(!form.is_in_flight());
}

#[test]
fn valid_submit_enters_submitting() {
    let mut form = controller();
    fill_valid(&mut form);
    let pending = form.begin_submit(now()).unwrap();
    assert_eq!(pending.seq, 1);
    assert_eq!(pending.submission.name, "Ada Lovelace");
    assert_eq!(pending.submission.form_name, "contact");
    assert_eq!(form.state(), SubmissionState::Submitting);
    assert!(form.is_in_flight());
    assert!(!form.is_submit_enabled());
    assert_eq!(form.submit_label(), SubmitLabel::Sending);
    assert_eq!(calls(&form).last(), Some(&Call::Label(SubmitLabel::Sending)));
}

#[test]
fn second_submit_while_in_flight_is_blocked() {
    let mut form = controller();
    fill_valid(&mut form);
    form.begin_submit(now()).unwrap();
    let before = calls(&form).len();
    assert_eq!(form.begin_submit(now()), Err(SubmitBlocked::InFlight));
    assert_eq!(calls(&form).len(), before);
}

// =============================================================
// finish_submit and settle
// =============================================================

#[test]
fn success_shows_message_then_resets_after_settle() {
    let mut form = controller();
    fill_valid(&mut form);
    let pending = form.begin_submit(now()).unwrap();

    let shown = form.finish_submit(pending.seq, &Ok(()));
    assert!(shown.is_some());
    assert_eq!(form.state(), SubmissionState::Success);
    assert_eq!(form.submit_label(), SubmitLabel::Sent);
    assert_eq!(
        shown_messages(&form),
        ["Your message has been sent successfully! I'll get back to you soon."]
    );
    assert_eq!(form.field(FieldName::Name).value, " Ada Lovelace ");

    form.settle(pending.seq);
    assert_eq!(form.state(), SubmissionState::Idle);
    assert!(!form.is_in_flight());
    assert!(!form.is_submit_enabled());
    assert_eq!(form.submit_label(), SubmitLabel::Submit);
    for field in FieldName::ALL {
        assert!(form.field(field).value.is_empty());
    }
    assert!(calls(&form).contains(&Call::ClearValues));
    assert!(calls(&form).contains(&Call::Marker(FieldName::Message, FieldMarker::Neutral)));
    assert!(calls(&form).contains(&Call::Counter(FieldName::Message, None)));
}

#[test]
fn failure_keeps_values_and_reenables_after_settle() {
    let mut form = controller();
    fill_valid(&mut form);
    let pending = form.begin_submit(now()).unwrap();

    let outcome = Err(SubmitError::Status { status: 500, body: "boom".to_owned() });
    form.finish_submit(pending.seq, &outcome);
    assert_eq!(form.state(), SubmissionState::Error);
    assert!(!form.is_in_flight());
    assert_eq!(form.submit_label(), SubmitLabel::Failed);
    assert_eq!(
        shown_messages(&form),
        ["Sorry, there was an error sending your message. Please try again."]
    );

    form.settle(pending.seq);
    assert_eq!(form.state(), SubmissionState::Idle);
    assert_eq!(form.submit_label(), SubmitLabel::Submit);
    assert!(form.is_submit_enabled());
    assert_eq!(form.field(FieldName::Subject).value, "Collaboration");
    assert!(!calls(&form).contains(&Call::ClearValues));
}

#[test]
fn transport_error_is_treated_like_http_failure() {
    let mut form = controller();
    fill_valid(&mut form);
    let pending = form.begin_submit(now()).unwrap();
    form.finish_submit(pending.seq, &Err(SubmitError::Transport("offline".to_owned())));
    assert_eq!(form.state(), SubmissionState::Error);
    assert_eq!(form.submit_label(), SubmitLabel::Failed);
}

#[test]
fn blur_during_success_window_keeps_submit_disabled() {
    let mut form = controller();
    fill_valid(&mut form);
    let pending = form.begin_submit(now()).unwrap();
    form.finish_submit(pending.seq, &Ok(()));
    assert!(form.on_blur(FieldName::Name));
    assert!(!form.is_submit_enabled());
    assert_eq!(form.begin_submit(now()), Err(SubmitBlocked::InFlight));
}

#[test]
fn stale_result_is_ignored() {
    let mut form = controller();
    fill_valid(&mut form);
    let pending = form.begin_submit(now()).unwrap();
    assert_eq!(form.finish_submit(pending.seq + 1, &Ok(())), None);
    assert_eq!(form.state(), SubmissionState::Submitting);
}

#[test]
fn retry_during_error_window_outlives_old_settle() {
    let mut form = controller();
    fill_valid(&mut form);
    let first = form.begin_submit(now()).unwrap();
    form.finish_submit(first.seq, &Err(SubmitError::Transport("offline".to_owned())));

    let second = form.begin_submit(now()).unwrap();
    assert_eq!(second.seq, 2);
    form.settle(first.seq);
    assert_eq!(form.state(), SubmissionState::Submitting);
    assert_eq!(form.submit_label(), SubmitLabel::Sending);
}

// =============================================================
// Notifications
// =============================================================

#[test]
fn dismiss_only_removes_the_notification_still_shown() {
    let mut form = controller();
    let first = form.notify(NotificationKind::Error, "first");
    let second = form.notify(NotificationKind::Success, "second");
    form.dismiss_notification(first);
    assert!(!calls(&form).contains(&Call::Dismiss(first)));
    assert_eq!(form.active_notification(), Some(second));

    form.dismiss_notification(second);
    assert_eq!(calls(&form).last(), Some(&Call::Dismiss(second)));
    assert_eq!(form.active_notification(), None);
}

#[test]
fn notification_ids_increase() {
    let mut form = controller();
    let a = form.notify(NotificationKind::Success, "a");
    let b = form.notify(NotificationKind::Error, "b");
    assert!(b > a);
}

// =============================================================
// run_submission
// =============================================================

#[test]
fn run_submission_success_posts_once_and_resets() {
    let cell = RefCell::new(controller());
    fill_valid(&mut cell.borrow_mut());
    let transport = FakeTransport::responding(200);
    let timer = RecordingTimer::default();

    let outcome = futures::executor::block_on(run_submission(&cell, &transport, &timer, now()));
    assert_eq!(outcome, Ok(SubmitOutcome::Sent));

    let posted = transport.posted.borrow();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].message, "I would like to work with you on a project.");

    let mut sleeps = timer.sleeps.borrow().clone();
    sleeps.sort_unstable();
    assert_eq!(sleeps, [3000, 5000]);

    let form = cell.borrow();
    assert_eq!(form.state(), SubmissionState::Idle);
    assert!(!form.is_submit_enabled());
    assert!(form.field(FieldName::Email).value.is_empty());
    assert_eq!(form.active_notification(), None);
}

#[test]
fn run_submission_failure_keeps_values() {
    let cell = RefCell::new(controller());
    fill_valid(&mut cell.borrow_mut());
    let transport = FakeTransport::unreachable();
    let timer = RecordingTimer::default();

    let outcome = futures::executor::block_on(run_submission(&cell, &transport, &timer, now()));
    assert_eq!(outcome, Ok(SubmitOutcome::Failed));

    let form = cell.borrow();
    assert_eq!(form.state(), SubmissionState::Idle);
    assert!(form.is_submit_enabled());
    assert_eq!(form.field(FieldName::Email).value, "ada@example.com");
}

#[test]
fn run_submission_non_2xx_is_failure() {
    let cell = RefCell::new(controller());
    fill_valid(&mut cell.borrow_mut());
    let transport = FakeTransport::responding(404);
    let timer = RecordingTimer::default();

    let outcome = futures::executor::block_on(run_submission(&cell, &transport, &timer, now()));
    assert_eq!(outcome, Ok(SubmitOutcome::Failed));
}

#[test]
fn run_submission_invalid_form_never_posts() {
    let cell = RefCell::new(controller());
    fill(&mut cell.borrow_mut(), "Al", "a@b.com", "Hi there", "short");
    let transport = FakeTransport::responding(200);
    let timer = RecordingTimer::default();

    let outcome = futures::executor::block_on(run_submission(&cell, &transport, &timer, now()));
    assert!(matches!(
        outcome,
        Err(SubmitBlocked::Invalid { first_invalid: Some(FieldName::Message), .. })
    ));
    assert!(transport.posted.borrow().is_empty());
    assert_eq!(*timer.sleeps.borrow(), [5000]);
    assert_eq!(cell.borrow().active_notification(), None);
}

#[test]
fn run_submission_uses_configured_timings() {
    let config = FormConfig { result_display_ms: 10, notification_dismiss_ms: 20, ..FormConfig::default() };
    let cell = RefCell::new(FormController::new(RecordingView::default(), RuleTable::contact().unwrap(), config));
    fill_valid(&mut cell.borrow_mut());
    let transport = FakeTransport::responding(204);
    let timer = RecordingTimer::default();

    futures::executor::block_on(run_submission(&cell, &transport, &timer, now())).unwrap();
    let mut sleeps = timer.sleeps.borrow().clone();
    sleeps.sort_unstable();
    assert_eq!(sleeps, [10, 20]);
}
