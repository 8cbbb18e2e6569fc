//! Global application state for the TUI (the "Model" in Elm architecture).
//!
//! `App` is the workflow's top level: it owns the draft while composing and
//! the sealed record (inside the controller) afterwards, and it is the only
//! writer of either. Worker threads report through channels drained once per
//! event-loop turn.

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::i18n;
use crate::model::{CapsuleDraft, CapsuleRecord, DraftGeneration};
use crate::preview::{self, PreviewPipeline, PreviewUpdate};
use crate::submit::{SimulatedService, SubmissionController, SubmissionOutcome, SubmitService};
use crate::validate;

/// Which top-level screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// The compose form; no sealed record exists yet.
    Compose,
    /// The confirmation view for a sealed capsule.
    Sealed,
}

/// Which form element currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Email,
    Letter,
    Date,
    Attachments,
}

/// Complete TUI state.
pub struct App {
    // ── Capsule workflow ──────────────────────
    /// The draft being composed. Replaced wholesale on "create another".
    pub draft: CapsuleDraft,
    /// Validate-and-submit state machine; owns the record after sealing.
    pub controller: SubmissionController,

    // ── Async plumbing ────────────────────────
    pipeline: PreviewPipeline,
    preview_rx: Receiver<PreviewUpdate>,
    outcome_rx: Receiver<SubmissionOutcome>,
    clock: Box<dyn Clock>,
    /// Generation handed to the most recent draft.
    generation: u64,

    // ── UI state ──────────────────────────────
    /// Focused form element.
    pub focus: FormFocus,
    /// Selected row in the attachment list.
    pub attachment_selected: usize,
    /// Help popup visible?
    pub show_help: bool,
    /// Attach-file popup visible?
    pub show_attach: bool,
    /// Path being typed in the attach popup.
    pub attach_input: String,
    /// Embed popup visible?
    pub show_embed: bool,
    /// Page address used by the embed snippet (from config).
    pub embed_url: String,

    // ── Lifecycle ─────────────────────────────
    pub should_quit: bool,
    /// Transient status message and the instant it was set.
    pub status_message: Option<(String, std::time::Instant)>,
}

impl App {
    /// Create an `App` wired to the real clock and the simulated backend.
    pub fn new(config: &Config) -> Self {
        Self::with_parts(
            config.embed.page_url.clone(),
            Box::new(SystemClock),
            Box::new(SimulatedService::new(Duration::from_millis(
                config.submission.delay_ms,
            ))),
        )
    }

    /// Create an `App` with an injected clock and submission service.
    pub fn with_parts(
        embed_url: String,
        clock: Box<dyn Clock>,
        service: Box<dyn SubmitService>,
    ) -> Self {
        let (preview_tx, preview_rx) = mpsc::channel();
        let (outcome_tx, outcome_rx) = mpsc::channel();

        Self {
            draft: CapsuleDraft::new(DraftGeneration(0)),
            controller: SubmissionController::new(service, outcome_tx),
            pipeline: PreviewPipeline::new(preview_tx),
            preview_rx,
            outcome_rx,
            clock,
            generation: 0,
            focus: FormFocus::Email,
            attachment_selected: 0,
            show_help: false,
            show_attach: false,
            attach_input: String::new(),
            show_embed: false,
            embed_url,
            should_quit: false,
            status_message: None,
        }
    }

    /// Top-level display selector: Compose until a record exists.
    pub fn screen(&self) -> Screen {
        if self.controller.record().is_some() {
            Screen::Sealed
        } else {
            Screen::Compose
        }
    }

    /// The sealed record, once one exists.
    pub fn record(&self) -> Option<&CapsuleRecord> {
        self.controller.record()
    }

    /// Earliest selectable delivery date (tomorrow), for the date hint.
    pub fn min_date(&self) -> chrono::NaiveDate {
        validate::min_delivery_date(&*self.clock)
    }

    /// Attempt to seal the capsule.
    ///
    /// While a submission is in flight this is a no-op; the submit control
    /// is disabled.
    pub fn submit(&mut self) {
        if self.controller.submit(&self.draft, &*self.clock) {
            self.set_status(i18n::tui_sealing());
        }
    }

    /// Attach the file at `raw` (a path typed in the attach popup).
    /// Returns `true` when the attachment was added.
    pub fn attach(&mut self, raw: &str) -> bool {
        let raw = raw.trim();
        if raw.is_empty() {
            return false;
        }
        let path = std::path::PathBuf::from(raw);
        match preview::probe(&path) {
            Ok(info) => {
                let id = self.draft.add_attachment(
                    path.clone(),
                    info.filename.clone(),
                    info.content_type.clone(),
                    info.size,
                );
                self.pipeline
                    .request(self.draft.generation(), id, path, &info.content_type);
                self.set_status(&format!("{}: {}", i18n::status_attached(), info.filename));
                true
            }
            Err(e) => {
                tracing::warn!(path = raw, error = %e, "Attach failed");
                self.set_status(&e.to_string());
                false
            }
        }
    }

    /// Remove the selected attachment (and with it, its preview).
    pub fn remove_selected_attachment(&mut self) {
        if let Some(removed) = self.draft.remove_attachment(self.attachment_selected) {
            let count = self.draft.attachments.len();
            if self.attachment_selected >= count && count > 0 {
                self.attachment_selected = count - 1;
            }
            self.set_status(&format!("{}: {}", i18n::status_removed(), removed.filename));
        }
    }

    /// Discard the sealed record and any residual draft state, returning to
    /// the compose screen with a fresh empty draft and an `Idle` controller.
    pub fn create_another(&mut self) {
        self.generation += 1;
        self.draft = CapsuleDraft::new(DraftGeneration(self.generation));
        self.controller.reset();
        self.focus = FormFocus::Email;
        self.attachment_selected = 0;
        self.attach_input.clear();
        self.set_status(i18n::status_new_capsule());
    }

    /// Drain worker messages. Called once per event-loop turn.
    pub fn drain_events(&mut self) {
        while let Ok(update) = self.preview_rx.try_recv() {
            self.apply_preview(update);
        }
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.controller.handle_outcome(outcome);
        }
    }

    /// Apply one preview result, dropping it when it belongs to a discarded
    /// draft or an attachment that was removed in the meantime.
    fn apply_preview(&mut self, update: PreviewUpdate) {
        if update.generation != self.draft.generation() {
            tracing::debug!(?update.generation, "Dropping preview for stale draft");
            return;
        }
        self.draft.set_preview(update.id, update.preview);
    }

    /// Set a transient status message that auto-clears after a few seconds.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), std::time::Instant::now()));
    }

    /// Called every tick: clears expired status messages.
    pub fn tick(&mut self) {
        if let Some((_, when)) = &self.status_message {
            if when.elapsed().as_secs() >= 5 {
                self.status_message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn test_app() -> App {
        App::with_parts(
            "https://capsule.example.com/".into(),
            Box::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 1, 4).unwrap())),
            Box::new(SimulatedService::new(Duration::ZERO)),
        )
    }

    #[test]
    fn test_starts_on_compose_with_empty_draft() {
        let app = test_app();
        assert_eq!(app.screen(), Screen::Compose);
        assert!(app.draft.email.is_empty());
        assert!(app.draft.attachments.is_empty());
    }

    #[test]
    fn test_min_date_is_tomorrow() {
        let app = test_app();
        assert_eq!(app.min_date(), NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    }

    #[test]
    fn test_submit_with_empty_form_sets_error_and_stays_on_compose() {
        let mut app = test_app();
        app.submit();
        assert_eq!(app.screen(), Screen::Compose);
        assert_eq!(
            app.controller.error(),
            Some("Please fill in your email, letter, and a delivery date.")
        );
    }

    #[test]
    fn test_full_workflow_seal_and_create_another() {
        let mut app = test_app();
        app.draft.email = "a@b.com".into();
        app.draft.letter = "hi".into();
        app.draft.delivery_date = "2026-01-05".into();

        app.submit();
        assert!(app.controller.is_submitting());

        // Zero-delay service: the outcome is already queued.
        let outcome = app.outcome_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        app.controller.handle_outcome(outcome);
        assert_eq!(app.screen(), Screen::Sealed);
        let record = app.record().unwrap();
        assert_eq!(record.long_delivery_date(), "January 5, 2026");
        assert_eq!(record.email, "a@b.com");

        app.create_another();
        assert_eq!(app.screen(), Screen::Compose);
        assert!(app.draft.email.is_empty());
        assert!(app.draft.letter.is_empty());
        assert!(app.draft.delivery_date.is_empty());
        assert!(app.draft.attachments.is_empty());
        assert!(!app.controller.is_submitting());
    }

    #[test]
    fn test_stale_preview_after_create_another_is_dropped() {
        let mut app = test_app();
        let old_generation = app.draft.generation();
        let id = app.draft.add_attachment(
            "ghost.png".into(),
            "ghost.png".into(),
            "image/png".into(),
            1,
        );

        app.create_another();
        app.apply_preview(PreviewUpdate {
            generation: old_generation,
            id,
            preview: crate::model::Preview::Unpreviewable,
        });
        assert!(app.draft.attachments.is_empty());
    }

    #[test]
    fn test_remove_selected_attachment_clamps_selection() {
        let mut app = test_app();
        for name in ["a.txt", "b.txt"] {
            app.draft
                .add_attachment(name.into(), name.into(), "text/plain".into(), 1);
        }
        app.attachment_selected = 1;
        app.remove_selected_attachment();
        assert_eq!(app.draft.attachments.len(), 1);
        assert_eq!(app.attachment_selected, 0);
    }
}
