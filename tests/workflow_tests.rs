//! Integration tests for the capsule workflow: validation, the submission
//! state machine, the attachment-preview pipeline, and the workflow reset.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use capsuleshell::clock::FixedClock;
use capsuleshell::model::{CapsuleDraft, CapsuleRecord, DraftGeneration, Preview};
use capsuleshell::preview::PreviewPipeline;
use capsuleshell::submit::{
    SimulatedService, SubmissionOutcome, SubmissionState, SubmitOutcome, SubmitService,
};
use capsuleshell::tui::app::{App, Screen};

/// "Today" for every test: 2026-01-04.
fn fixed_clock() -> FixedClock {
    FixedClock::on(NaiveDate::from_ymd_opt(2026, 1, 4).unwrap())
}

fn app_with_service(service: Box<dyn SubmitService>) -> App {
    App::with_parts(
        "https://capsule.example.com/".into(),
        Box::new(fixed_clock()),
        service,
    )
}

fn app() -> App {
    app_with_service(Box::new(SimulatedService::new(Duration::from_millis(30))))
}

fn fill_valid(app: &mut App) {
    app.draft.email = "a@b.com".into();
    app.draft.letter = "hi".into();
    app.draft.delivery_date = "2026-01-05".into();
}

/// Drain worker messages until `done` holds or the timeout elapses.
fn drain_until(app: &mut App, timeout: Duration, done: impl Fn(&App) -> bool) {
    let deadline = Instant::now() + timeout;
    while !done(app) {
        assert!(Instant::now() < deadline, "timed out waiting for workers");
        app.drain_events();
        std::thread::sleep(Duration::from_millis(5));
    }
}

/// Service that counts invocations and always succeeds immediately.
struct CountingService {
    calls: Arc<AtomicUsize>,
}

impl SubmitService for CountingService {
    fn submit(&self, attempt: u64, record: CapsuleRecord, reply: Sender<SubmissionOutcome>) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = reply.send(SubmissionOutcome {
            attempt,
            outcome: SubmitOutcome::Accepted(record),
        });
    }
}

// ─── Test 1: missing fields keep the controller Idle ────────────────

#[test]
fn test_submit_with_missing_fields_reports_error_and_stays_idle() {
    let mut app = app();
    app.draft.email = "a@b.com".into();
    // letter and date left empty
    app.submit();

    assert!(matches!(app.controller.state(), SubmissionState::Idle));
    assert_eq!(
        app.controller.error(),
        Some("Please fill in your email, letter, and a delivery date.")
    );
    assert_eq!(app.screen(), Screen::Compose);
    // The draft is untouched.
    assert_eq!(app.draft.email, "a@b.com");
}

// ─── Test 2: today or earlier is rejected ───────────────────────────

#[test]
fn test_submit_with_past_or_today_date_is_rejected() {
    for date in ["2026-01-04", "2025-12-31", "1999-01-01"] {
        let mut app = app();
        fill_valid(&mut app);
        app.draft.delivery_date = date.into();
        app.submit();

        assert!(matches!(app.controller.state(), SubmissionState::Idle));
        assert_eq!(
            app.controller.error(),
            Some("The delivery date must be in the future."),
            "date {date} should be rejected"
        );
    }
}

// ─── Test 3: tomorrow seals after the delay ─────────────────────────

#[test]
fn test_submit_with_tomorrow_succeeds_after_delay() {
    let mut app = app();
    fill_valid(&mut app);
    app.submit();

    assert!(app.controller.is_submitting());
    assert_eq!(app.screen(), Screen::Compose, "still composing while in flight");

    drain_until(&mut app, Duration::from_secs(5), |a| {
        a.screen() == Screen::Sealed
    });

    let record = app.record().expect("record exists after sealing");
    assert_eq!(record.email, "a@b.com");
    assert_eq!(record.letter, "hi");
    assert_eq!(
        record.delivery_date,
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    );
    assert!(record.attachments.is_empty());
}

// ─── Test 4: preview kinds match the selected files ─────────────────

#[test]
fn test_preview_kinds_match_media_types() {
    let tmp = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for name in ["one.png", "two.jpg", "notes.txt", "paper.pdf", "photo.gif"] {
        let path = tmp.path().join(name);
        std::fs::write(&path, b"payload").unwrap();
        paths.push(path);
    }

    let mut app = app();
    for path in &paths {
        assert!(app.attach(path.to_str().unwrap()));
    }
    assert_eq!(app.draft.attachments.len(), 5);

    drain_until(&mut app, Duration::from_secs(5), |a| {
        a.draft.pending_previews() == 0
    });

    let thumbnails = app
        .draft
        .attachments
        .iter()
        .filter(|a| matches!(a.preview, Preview::Thumbnail(_)))
        .count();
    let placeholders = app
        .draft
        .attachments
        .iter()
        .filter(|a| a.preview == Preview::Unpreviewable)
        .count();
    assert_eq!(thumbnails, 3, "png, jpg and gif are images");
    assert_eq!(placeholders, 2, "txt and pdf are not");

    // Thumbnails are self-contained data URIs.
    for att in &app.draft.attachments {
        if let Preview::Thumbnail(uri) = &att.preview {
            assert!(uri.starts_with("data:image/"), "got {uri}");
            assert!(uri.contains(";base64,"));
        }
    }
}

// ─── Test 5: removal keeps attachments and previews in lock-step ────

#[test]
fn test_remove_attachment_removes_exactly_one_entry() {
    let tmp = tempfile::tempdir().unwrap();
    let mut app = app();
    for name in ["a.txt", "b.txt", "c.txt"] {
        let path = tmp.path().join(name);
        std::fs::write(&path, b"x").unwrap();
        assert!(app.attach(path.to_str().unwrap()));
    }
    drain_until(&mut app, Duration::from_secs(5), |a| {
        a.draft.pending_previews() == 0
    });

    app.attachment_selected = 1;
    app.remove_selected_attachment();

    let names: Vec<&str> = app
        .draft
        .attachments
        .iter()
        .map(|a| a.filename.as_str())
        .collect();
    assert_eq!(names, ["a.txt", "c.txt"]);
    // Each survivor still carries its own (resolved) preview.
    for att in &app.draft.attachments {
        assert_eq!(att.preview, Preview::Unpreviewable);
    }
}

// ─── Test 6: unreadable image still surfaces as a placeholder ───────

#[test]
fn test_unreadable_image_degrades_to_placeholder() {
    // The file vanishes between selection and the worker's read: the
    // attachment must still surface, downgraded to a placeholder.
    let mut draft = CapsuleDraft::new(DraftGeneration(0));
    let id = draft.add_attachment(
        "/nonexistent/gone.png".into(),
        "gone.png".into(),
        "image/png".into(),
        3,
    );

    let (tx, rx) = std::sync::mpsc::channel();
    let pipeline = PreviewPipeline::new(tx);
    pipeline.request(
        draft.generation(),
        id,
        "/nonexistent/gone.png".into(),
        "image/png",
    );

    let update = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(draft.set_preview(update.id, update.preview));
    assert_eq!(draft.attachments.len(), 1, "attachment still surfaces");
    assert_eq!(draft.attachments[0].preview, Preview::Unpreviewable);
}

// ─── Test 7: "create another" fully resets the workflow ─────────────

#[test]
fn test_create_another_resets_draft_and_controller() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("pic.png");
    std::fs::write(&path, b"img").unwrap();

    let mut app = app();
    fill_valid(&mut app);
    assert!(app.attach(path.to_str().unwrap()));
    drain_until(&mut app, Duration::from_secs(5), |a| {
        a.draft.pending_previews() == 0
    });

    app.submit();
    drain_until(&mut app, Duration::from_secs(5), |a| {
        a.screen() == Screen::Sealed
    });
    assert_eq!(app.record().unwrap().attachments.len(), 1);

    app.create_another();

    assert_eq!(app.screen(), Screen::Compose);
    assert_eq!(app.draft.email, "");
    assert_eq!(app.draft.letter, "");
    assert_eq!(app.draft.delivery_date, "");
    assert!(app.draft.attachments.is_empty());
    assert!(matches!(app.controller.state(), SubmissionState::Idle));
    assert!(app.record().is_none());
}

// ─── Test 8: double submit invokes the collaborator once ────────────

#[test]
fn test_rapid_double_submit_is_single_flight() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut app = app_with_service(Box::new(CountingService {
        calls: Arc::clone(&calls),
    }));
    fill_valid(&mut app);

    app.submit();
    app.submit(); // second press while the first is in flight

    drain_until(&mut app, Duration::from_secs(5), |a| {
        a.screen() == Screen::Sealed
    });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// ─── Test 9: sealed view shows the long-form date ───────────────────

#[test]
fn test_sealed_record_formats_long_date() {
    let mut app = app();
    fill_valid(&mut app);
    app.submit();
    drain_until(&mut app, Duration::from_secs(5), |a| {
        a.screen() == Screen::Sealed
    });

    let record = app.record().unwrap();
    assert_eq!(record.long_delivery_date(), "January 5, 2026");
    assert_eq!(record.email, "a@b.com");
}

// ─── Test 10: previews land out of order without mixing slots ───────

#[test]
fn test_out_of_order_previews_resolve_by_identity() {
    let tmp = tempfile::tempdir().unwrap();
    // A large image (slow read) followed by non-images (instant placeholders):
    // the placeholders complete first, yet every token must land on its own
    // attachment.
    let big = tmp.path().join("big.png");
    std::fs::write(&big, vec![0u8; 4 * 1024 * 1024]).unwrap();
    let doc = tmp.path().join("doc.pdf");
    std::fs::write(&doc, b"pdf").unwrap();

    let mut app = app();
    assert!(app.attach(big.to_str().unwrap()));
    assert!(app.attach(doc.to_str().unwrap()));

    drain_until(&mut app, Duration::from_secs(10), |a| {
        a.draft.pending_previews() == 0
    });

    assert!(matches!(
        app.draft.attachments[0].preview,
        Preview::Thumbnail(_)
    ));
    assert_eq!(app.draft.attachments[1].preview, Preview::Unpreviewable);
}
