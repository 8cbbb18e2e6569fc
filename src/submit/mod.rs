//! Submission workflow: validate → (simulated) submit → success.
//!
//! The controller is a small state machine driven from the event loop. The
//! actual backend is behind [`SubmitService`]; the shipped implementation
//! simulates it with a fixed delay on a worker thread and always succeeds.
//! Failure outcomes are part of the contract regardless, so a real service
//! can slot in without touching the state machine.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::model::{CapsuleDraft, CapsuleRecord};
use crate::validate;

/// Where a submit attempt currently stands.
#[derive(Debug)]
pub enum SubmissionState {
    /// Nothing in flight; the form is editable and submittable.
    Idle,
    /// Synchronous validation in progress. Never observable across an
    /// event-loop turn; exists so the machine's states mirror its contract.
    Validating,
    /// A submission is in flight; the submit control is disabled.
    Submitting,
    /// The service rejected the attempt. Draft preserved, retry allowed.
    Failed(String),
    /// The capsule is sealed. Consumed by the workflow on "create another".
    Succeeded(CapsuleRecord),
}

/// What the service reported for one attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    Accepted(CapsuleRecord),
    Rejected(String),
}

/// Message sent back from the service worker to the event loop.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub attempt: u64,
    pub outcome: SubmitOutcome,
}

/// The external submission collaborator.
///
/// Implementations must eventually send exactly one [`SubmissionOutcome`]
/// carrying the given attempt id on the reply channel.
pub trait SubmitService: Send {
    fn submit(&self, attempt: u64, record: CapsuleRecord, reply: Sender<SubmissionOutcome>);
}

/// Fixed-delay stand-in for the real backend. Always succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedService {
    delay: Duration,
}

impl SimulatedService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl SubmitService for SimulatedService {
    fn submit(&self, attempt: u64, record: CapsuleRecord, reply: Sender<SubmissionOutcome>) {
        let delay = self.delay;
        thread::spawn(move || {
            thread::sleep(delay);
            // Receiver gone means the app quit mid-flight; fine to drop.
            let _ = reply.send(SubmissionOutcome {
                attempt,
                outcome: SubmitOutcome::Accepted(record),
            });
        });
    }
}

/// Orchestrates validation and submission for one draft at a time.
pub struct SubmissionController {
    state: SubmissionState,
    error: Option<String>,
    attempt: u64,
    service: Box<dyn SubmitService>,
    reply_tx: Sender<SubmissionOutcome>,
}

impl SubmissionController {
    /// `reply_tx` is the sending half of the channel the event loop drains;
    /// it is handed to the service on every attempt.
    pub fn new(service: Box<dyn SubmitService>, reply_tx: Sender<SubmissionOutcome>) -> Self {
        Self {
            state: SubmissionState::Idle,
            error: None,
            attempt: 0,
            service,
            reply_tx,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Inline error text to show near the form, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while an attempt is in flight (submit control disabled).
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting)
    }

    /// The sealed record, once one exists.
    pub fn record(&self) -> Option<&CapsuleRecord> {
        match &self.state {
            SubmissionState::Succeeded(record) => Some(record),
            _ => None,
        }
    }

    /// Attempt to submit the draft. Returns `true` if a submission started.
    ///
    /// No-op while `Submitting` (at-most-one in flight) and after success.
    /// On validation failure the machine returns to `Idle` with the error
    /// text set and the draft untouched.
    pub fn submit(&mut self, draft: &CapsuleDraft, clock: &dyn Clock) -> bool {
        match self.state {
            SubmissionState::Idle | SubmissionState::Failed(_) => {}
            SubmissionState::Submitting => {
                debug!("Submit ignored: already in flight");
                return false;
            }
            _ => return false,
        }

        self.state = SubmissionState::Validating;
        let date = match validate::validate_draft(draft, clock) {
            Ok(date) => date,
            Err(e) => {
                self.error = Some(e.to_string());
                self.state = SubmissionState::Idle;
                return false;
            }
        };

        self.error = None;
        self.attempt += 1;
        let record = CapsuleRecord {
            email: draft.email.clone(),
            letter: draft.letter.clone(),
            delivery_date: date,
            attachments: draft.attachments.clone(),
        };

        info!(attempt = self.attempt, date = %date, "Submitting capsule");
        self.service
            .submit(self.attempt, record, self.reply_tx.clone());
        self.state = SubmissionState::Submitting;
        true
    }

    /// Apply an outcome from the service worker.
    ///
    /// Outcomes for a superseded attempt (after a reset) or arriving in an
    /// unexpected state are discarded.
    pub fn handle_outcome(&mut self, outcome: SubmissionOutcome) {
        if outcome.attempt != self.attempt || !self.is_submitting() {
            warn!(
                attempt = outcome.attempt,
                current = self.attempt,
                "Dropping stale submission outcome"
            );
            return;
        }

        match outcome.outcome {
            SubmitOutcome::Accepted(record) => {
                info!(email = %record.email, "Capsule sealed");
                self.error = None;
                self.state = SubmissionState::Succeeded(record);
            }
            SubmitOutcome::Rejected(reason) => {
                warn!(reason = %reason, "Submission rejected");
                self.error = Some(reason.clone());
                self.state = SubmissionState::Failed(reason);
            }
        }
    }

    /// Dismiss a `Failed` state back to `Idle`, keeping the draft.
    pub fn dismiss_failure(&mut self) {
        if matches!(self.state, SubmissionState::Failed(_)) {
            self.state = SubmissionState::Idle;
            self.error = None;
        }
    }

    /// Return to `Idle` for a fresh draft. Any in-flight outcome becomes
    /// stale because the attempt id moves on.
    pub fn reset(&mut self) {
        self.attempt += 1;
        self.error = None;
        self.state = SubmissionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::DraftGeneration;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::{self, Receiver};
    use std::sync::Arc;

    /// Service that replies inline and counts invocations.
    struct CountingService {
        calls: Arc<AtomicUsize>,
        fail_with: Option<String>,
    }

    impl SubmitService for CountingService {
        fn submit(&self, attempt: u64, record: CapsuleRecord, reply: Sender<SubmissionOutcome>) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = match &self.fail_with {
                Some(reason) => SubmitOutcome::Rejected(reason.clone()),
                None => SubmitOutcome::Accepted(record),
            };
            let _ = reply.send(SubmissionOutcome { attempt, outcome });
        }
    }

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2026, 1, 4).unwrap())
    }

    fn valid_draft() -> CapsuleDraft {
        let mut d = CapsuleDraft::new(DraftGeneration(0));
        d.email = "a@b.com".into();
        d.letter = "hi".into();
        d.delivery_date = "2026-01-05".into();
        d
    }

    fn controller(
        fail_with: Option<String>,
    ) -> (SubmissionController, Receiver<SubmissionOutcome>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel();
        let service = CountingService {
            calls: Arc::clone(&calls),
            fail_with,
        };
        (SubmissionController::new(Box::new(service), tx), rx, calls)
    }

    #[test]
    fn test_validation_failure_stays_idle_with_error() {
        let (mut ctl, _rx, calls) = controller(None);
        let mut draft = valid_draft();
        draft.email.clear();

        assert!(!ctl.submit(&draft, &clock()));
        assert!(matches!(ctl.state(), SubmissionState::Idle));
        assert_eq!(
            ctl.error(),
            Some("Please fill in your email, letter, and a delivery date.")
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_successful_submission_produces_record() {
        let (mut ctl, rx, _calls) = controller(None);
        let draft = valid_draft();

        assert!(ctl.submit(&draft, &clock()));
        assert!(ctl.is_submitting());

        ctl.handle_outcome(rx.recv().unwrap());
        let record = ctl.record().expect("sealed");
        assert_eq!(record.email, "a@b.com");
        assert_eq!(record.letter, "hi");
        assert_eq!(record.long_delivery_date(), "January 5, 2026");
        assert!(ctl.error().is_none());
    }

    #[test]
    fn test_double_submit_is_single_flight() {
        let (mut ctl, rx, calls) = controller(None);
        let draft = valid_draft();

        assert!(ctl.submit(&draft, &clock()));
        // Second press while in flight: ignored, no second service call.
        assert!(!ctl.submit(&draft, &clock()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        ctl.handle_outcome(rx.recv().unwrap());
        assert!(rx.try_recv().is_err(), "exactly one outcome expected");
        // And after success, further submits are also ignored.
        assert!(!ctl.submit(&draft, &clock()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rejection_enters_failed_and_allows_retry() {
        let (mut ctl, rx, calls) = controller(Some("backend unavailable".into()));
        let draft = valid_draft();

        ctl.submit(&draft, &clock());
        ctl.handle_outcome(rx.recv().unwrap());
        assert!(matches!(ctl.state(), SubmissionState::Failed(_)));
        assert_eq!(ctl.error(), Some("backend unavailable"));

        // Draft is preserved and a retry is allowed straight from Failed.
        assert!(ctl.submit(&draft, &clock()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stale_outcome_after_reset_is_dropped() {
        let (mut ctl, rx, _calls) = controller(None);
        let draft = valid_draft();

        ctl.submit(&draft, &clock());
        let late = rx.recv().unwrap();

        // The user resets before the outcome is applied.
        ctl.reset();
        ctl.handle_outcome(late);
        assert!(matches!(ctl.state(), SubmissionState::Idle));
        assert!(ctl.record().is_none());
    }

    #[test]
    fn test_dismiss_failure_returns_to_idle() {
        let (mut ctl, rx, _calls) = controller(Some("nope".into()));
        ctl.submit(&valid_draft(), &clock());
        ctl.handle_outcome(rx.recv().unwrap());

        ctl.dismiss_failure();
        assert!(matches!(ctl.state(), SubmissionState::Idle));
        assert!(ctl.error().is_none());
    }
}
