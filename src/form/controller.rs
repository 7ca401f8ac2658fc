//! Form controller: validation, submit gating, and the submission lifecycle.
//!
//! DESIGN
//! ======
//! The controller is the single owner of form state. DOM handlers call its
//! synchronous entry points (`on_input`, `on_blur`, `begin_submit`, ...) and it
//! pushes changes out through [`FormView`]. It remembers what it last pushed
//! for each field marker, the submit control, and the counters, so repeated
//! validation with unchanged values does not touch the view again.
//!
//! The asynchronous part of a submission lives in [`run_submission`], which
//! only borrows the controller between suspension points. That keeps it safe
//! to share the controller through `Rc<RefCell<_>>` with event handlers that
//! fire while a request is outstanding.
//!
//! INVARIANT
//! =========
//! The submit control is enabled iff every field's current value satisfies
//! its rule and no submission is in flight. A submission counts as in flight from
//! `begin_submit` until it fails or the form resets after success.

use std::cell::RefCell;

use time::OffsetDateTime;

use super::counter::CharacterCount;
use super::field::{Field, FieldMap, FieldName};
use super::rules::RuleTable;
use super::state::{FormEvent, SubmissionState};
use super::validate::{Validation, validate};
use super::view::{FieldMarker, FormView, Notification, NotificationKind, SubmitLabel};
use crate::config::FormConfig;
use crate::consts::{FAILURE_NOTIFICATION, INVALID_FORM_NOTIFICATION, SUCCESS_NOTIFICATION};
use crate::error::SubmitError;
use crate::net::submit::{Submission, Transport};
use crate::util::timer::Timer;

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// Why a submit attempt did not reach the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// Another submission is still pending or showing its success.
    InFlight,
    /// Validation failed; the user was notified and focus moved.
    Invalid { first_invalid: Option<FieldName>, notification: u64 },
}

/// A submission accepted by [`FormController::begin_submit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSubmission {
    /// Sequence number to hand back to `finish_submit` and `settle`.
    pub seq: u64,
    pub submission: Submission,
}

/// How a submission attempt ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
}

pub struct FormController<V: FormView> {
    view: V,
    rules: RuleTable,
    config: FormConfig,
    fields: FieldMap<Field>,
    state: SubmissionState,
    in_flight: bool,
    submission_seq: u64,
    notification_seq: u64,
    active_notification: Option<u64>,
    // Last values pushed to the view.
    markers: FieldMap<FieldMarker>,
    counters: FieldMap<Option<CharacterCount>>,
    submit_enabled: bool,
    label: SubmitLabel,
}

impl<V: FormView> FormController<V> {
    /// Create a controller and put the view in its initial state: submit
    /// disabled, label "Submit".
    pub fn new(mut view: V, rules: RuleTable, config: FormConfig) -> Self {
        view.set_submit_enabled(false);
        Self {
            view,
            rules,
            config,
            fields: FieldMap::from_fn(Field::new),
            state: SubmissionState::Idle,
            in_flight: false,
            submission_seq: 0,
            notification_seq: 0,
            active_notification: None,
            markers: FieldMap::default(),
            counters: FieldMap::default(),
            submit_enabled: false,
            label: SubmitLabel::Submit,
        }
    }

    // --- Accessors ---

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn field(&self, field: FieldName) -> &Field {
        &self.fields[field]
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn submit_label(&self) -> SubmitLabel {
        self.label
    }

    // --- Event handlers ---

    /// Record a value read from the document without treating it as user
    /// activity (e.g. syncing autofilled inputs before a submit).
    pub fn set_value(&mut self, field: FieldName, value: &str) {
        if self.fields[field].value != value {
            value.clone_into(&mut self.fields[field].value);
        }
    }

    /// Input event: store the value, refresh the character counter, and
    /// re-evaluate the submit gate. Field markers wait for the next blur.
    pub fn on_input(&mut self, field: FieldName, value: &str) {
        self.set_value(field, value);
        self.advance(FormEvent::Activity);
        self.refresh_counter(field);
        let all_valid = FieldName::ALL.into_iter().all(|f| self.validate_field(f).is_valid);
        self.apply_submit_enabled(all_valid && !self.in_flight);
    }

    /// Blur event: revalidate the whole form. Returns the aggregate validity.
    pub fn on_blur(&mut self, field: FieldName) -> bool {
        log::trace!("blur on {field}");
        self.advance(FormEvent::Activity);
        self.validate_all()
    }

    /// Validate one field against the rule table without side effects.
    pub fn validate_field(&self, field: FieldName) -> Validation {
        validate(&self.rules, field, &self.fields[field].value)
    }

    /// Validate every field, update markers and the submit gate, and return
    /// whether all fields are valid.
    ///
    /// This is the only place field markers are set, apart from [`reset`].
    ///
    /// [`reset`]: Self::reset
    pub fn validate_all(&mut self) -> bool {
        let mut all_valid = true;
        for field in FieldName::ALL {
            let result = self.validate_field(field);
            let marker = if !result.is_valid {
                FieldMarker::Error(result.message.clone())
            } else if self.fields[field].trimmed().is_empty() {
                FieldMarker::Neutral
            } else {
                FieldMarker::Success
            };
            let slot = &mut self.fields[field];
            slot.valid = result.is_valid;
            slot.error = result.message;
            all_valid &= result.is_valid;
            self.apply_marker(field, marker);
        }
        self.advance(FormEvent::Validated { all_valid });
        self.apply_submit_enabled(all_valid && !self.in_flight);
        all_valid
    }

    /// Start a submission: guard against re-entry, validate, snapshot the
    /// payload, and switch the view to its sending state.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitBlocked::InFlight`] when a submission is already in
    /// flight and [`SubmitBlocked::Invalid`] when validation fails. Neither
    /// case reaches the network.
    pub fn begin_submit(&mut self, submitted_at: OffsetDateTime) -> Result<PendingSubmission, SubmitBlocked> {
        if self.in_flight {
            log::debug!("submit ignored: submission already in flight");
            return Err(SubmitBlocked::InFlight);
        }

        self.advance(FormEvent::Activity);
        if !self.validate_all() {
            let notification = self.notify(NotificationKind::Error, INVALID_FORM_NOTIFICATION);
            let first_invalid = FieldName::ALL.into_iter().find(|field| !self.fields[*field].valid);
            if let Some(field) = first_invalid {
                self.view.focus_field(field);
            }
            return Err(SubmitBlocked::Invalid { first_invalid, notification });
        }

        let submission = Submission::from_fields(&self.fields, &self.config.form_name, submitted_at);
        log::info!("submitting form: {submission:?}");

        self.in_flight = true;
        self.submission_seq += 1;
        self.advance(FormEvent::SubmitStarted);
        self.apply_submit_enabled(false);
        self.apply_label(SubmitLabel::Sending);

        Ok(PendingSubmission { seq: self.submission_seq, submission })
    }

    /// Apply the transport result of submission `seq`. Returns the id of the
    /// notification shown, or `None` if `seq` is stale.
    pub fn finish_submit(&mut self, seq: u64, outcome: &Result<(), SubmitError>) -> Option<u64> {
        if seq != self.submission_seq || self.state != SubmissionState::Submitting {
            log::warn!("ignoring result of stale submission {seq}");
            return None;
        }

        match outcome {
            Ok(()) => {
                self.advance(FormEvent::Succeeded);
                self.apply_label(SubmitLabel::Sent);
                Some(self.notify(NotificationKind::Success, SUCCESS_NOTIFICATION))
            }
            Err(err) => {
                log::error!("form submission failed: {err}");
                self.in_flight = false;
                self.advance(FormEvent::Failed);
                self.apply_label(SubmitLabel::Failed);
                Some(self.notify(NotificationKind::Error, FAILURE_NOTIFICATION))
            }
        }
    }

    /// End the result display window of submission `seq`.
    ///
    /// After success the form resets completely. After failure the label is
    /// restored and the submit gate re-evaluated with the values kept. A
    /// newer submission makes this a no-op.
    pub fn settle(&mut self, seq: u64) {
        if seq != self.submission_seq {
            return;
        }
        match self.state {
            SubmissionState::Success => self.reset(),
            SubmissionState::Error => {
                self.advance(FormEvent::Settled);
                self.apply_label(SubmitLabel::Submit);
                self.validate_all();
            }
            _ => {}
        }
    }

    /// Clear values, markers, and counters and return the submit control to
    /// its initial disabled state.
    pub fn reset(&mut self) {
        self.in_flight = false;
        self.state = SubmissionState::Idle;
        self.fields = FieldMap::from_fn(Field::new);
        self.view.clear_values();
        for field in FieldName::ALL {
            self.apply_marker(field, FieldMarker::Neutral);
            if self.counters[field].take().is_some() {
                self.view.set_character_count(field, None);
            }
        }
        self.apply_label(SubmitLabel::Submit);
        self.apply_submit_enabled(false);
    }

    // --- Notifications ---

    /// Show a notification, replacing the current one. Returns its id for
    /// [`dismiss_notification`](Self::dismiss_notification).
    pub fn notify(&mut self, kind: NotificationKind, message: &str) -> u64 {
        self.notification_seq += 1;
        let notification = Notification { id: self.notification_seq, kind, message: message.to_owned() };
        self.active_notification = Some(notification.id);
        self.view.show_notification(&notification);
        notification.id
    }

    /// Dismiss notification `id` if it is still the one shown.
    pub fn dismiss_notification(&mut self, id: u64) {
        if self.active_notification == Some(id) {
            self.active_notification = None;
            self.view.dismiss_notification(id);
        }
    }

    pub fn active_notification(&self) -> Option<u64> {
        self.active_notification
    }

    fn advance(&mut self, event: FormEvent) {
        let next = self.state.next(event);
        if next != self.state {
            log::debug!("form state {} -> {}", self.state.as_str(), next.as_str());
            self.state = next;
        }
    }

    // --- View diffing ---

    fn apply_marker(&mut self, field: FieldName, marker: FieldMarker) {
        if self.markers[field] != marker {
            self.view.set_field_marker(field, &marker);
            self.markers[field] = marker;
        }
    }

    fn apply_submit_enabled(&mut self, enabled: bool) {
        if self.submit_enabled != enabled {
            self.submit_enabled = enabled;
            self.view.set_submit_enabled(enabled);
        }
    }

    fn apply_label(&mut self, label: SubmitLabel) {
        if self.label != label {
            self.label = label;
            self.view.set_submit_label(label);
        }
    }

    fn refresh_counter(&mut self, field: FieldName) {
        let Some(max) = self.rules.rule(field).max_length else {
            return;
        };
        let count = Some(CharacterCount::new(&self.fields[field].value, max));
        if self.counters[field] != count {
            self.counters[field] = count;
            self.view.set_character_count(field, count);
        }
    }
}

/// Drive one submit attempt to completion.
///
/// Starts the submission, awaits the transport, applies the outcome, then
/// waits out the result window (settling the form) and the notification
/// dismiss delay concurrently. The controller is never borrowed across an
/// `.await`.
///
/// # Errors
///
/// Returns the [`SubmitBlocked`] reason when the attempt never reached the
/// transport. For an invalid form the error notification is still dismissed
/// on schedule before returning.
pub async fn run_submission<V, T, S>(
    controller: &RefCell<FormController<V>>,
    transport: &T,
    timer: &S,
    submitted_at: OffsetDateTime,
) -> Result<SubmitOutcome, SubmitBlocked>
where
    V: FormView,
    T: Transport,
    S: Timer,
{
    let (begun, result_ms, dismiss_ms) = {
        let mut form = controller.borrow_mut();
        let begun = form.begin_submit(submitted_at);
        (begun, form.config().result_display_ms, form.config().notification_dismiss_ms)
    };

    let pending = match begun {
        Ok(pending) => pending,
        Err(blocked) => {
            if let SubmitBlocked::Invalid { notification, .. } = blocked {
                timer.sleep(dismiss_ms).await;
                controller.borrow_mut().dismiss_notification(notification);
            }
            return Err(blocked);
        }
    };

    let outcome = transport.post(&pending.submission).await;
    let sent = if outcome.is_ok() { SubmitOutcome::Sent } else { SubmitOutcome::Failed };
    let notification = controller.borrow_mut().finish_submit(pending.seq, &outcome);

    let settle = async {
        timer.sleep(result_ms).await;
        controller.borrow_mut().settle(pending.seq);
    };
    let dismiss = async {
        if let Some(id) = notification {
            timer.sleep(dismiss_ms).await;
            controller.borrow_mut().dismiss_notification(id);
        }
    };
    futures::join!(settle, dismiss);

    Ok(sent)
}
