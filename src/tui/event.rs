//! Keyboard and input event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, FormFocus, Screen};

/// Process a key event and update the application state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    // ── Popup handling (captures all keys) ────────────────
    if app.show_help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) => app.show_help = false,
            _ => {}
        }
        return Ok(());
    }

    if app.show_attach {
        return handle_attach_popup(app, key);
    }

    if app.show_embed {
        match key.code {
            KeyCode::Esc | KeyCode::Char('e') => app.show_embed = false,
            _ => {}
        }
        return Ok(());
    }

    // ── Always-available shortcuts ────────────────────────
    match (key.modifiers, key.code) {
        // Ctrl+C always quits, from any screen
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
            return Ok(());
        }
        (_, KeyCode::F(1)) => {
            app.show_help = true;
            return Ok(());
        }
        _ => {}
    }

    match app.screen() {
        Screen::Sealed => handle_sealed_keys(app, key),
        Screen::Compose => handle_compose_keys(app, key),
    }
}

/// Key handling on the confirmation screen.
fn handle_sealed_keys(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    match key.code {
        KeyCode::Char('n') => app.create_another(),
        KeyCode::Char('e') => app.show_embed = true,
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
    Ok(())
}

/// Key handling on the compose screen.
fn handle_compose_keys(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    // Shortcuts that work regardless of the focused field
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
            app.submit();
            return Ok(());
        }
        (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
            app.show_embed = true;
            return Ok(());
        }
        (_, KeyCode::Tab) => {
            app.focus = next_focus(app.focus, true);
            return Ok(());
        }
        (_, KeyCode::BackTab) => {
            app.focus = next_focus(app.focus, false);
            return Ok(());
        }
        // Dismiss a submission failure, keeping the draft for retry
        (_, KeyCode::Esc) => {
            app.controller.dismiss_failure();
            return Ok(());
        }
        _ => {}
    }

    match app.focus {
        FormFocus::Email => handle_single_line_keys(app, key, Field::Email),
        FormFocus::Date => handle_single_line_keys(app, key, Field::Date),
        FormFocus::Letter => handle_letter_keys(app, key),
        FormFocus::Attachments => handle_attachment_keys(app, key),
    }
}

/// Cycle focus to the next (or previous) form element.
fn next_focus(focus: FormFocus, forward: bool) -> FormFocus {
    if forward {
        match focus {
            FormFocus::Email => FormFocus::Letter,
            FormFocus::Letter => FormFocus::Date,
            FormFocus::Date => FormFocus::Attachments,
            FormFocus::Attachments => FormFocus::Email,
        }
    } else {
        match focus {
            FormFocus::Email => FormFocus::Attachments,
            FormFocus::Letter => FormFocus::Email,
            FormFocus::Date => FormFocus::Letter,
            FormFocus::Attachments => FormFocus::Date,
        }
    }
}

/// Which single-line field is being edited.
enum Field {
    Email,
    Date,
}

/// Editing for the single-line email and date fields.
fn handle_single_line_keys(app: &mut App, key: KeyEvent, field: Field) -> anyhow::Result<()> {
    let value = match field {
        Field::Email => &mut app.draft.email,
        Field::Date => &mut app.draft.delivery_date,
    };
    match key.code {
        KeyCode::Char(c) => value.push(c),
        KeyCode::Backspace => {
            value.pop();
        }
        KeyCode::Enter => match field {
            // Enter walks down the form; from the date field it submits.
            Field::Email => app.focus = FormFocus::Letter,
            Field::Date => app.submit(),
        },
        _ => {}
    }
    Ok(())
}

/// Editing for the multi-line letter field. Enter inserts a newline.
fn handle_letter_keys(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    match key.code {
        KeyCode::Char(c) => app.draft.letter.push(c),
        KeyCode::Enter => app.draft.letter.push('\n'),
        KeyCode::Backspace => {
            app.draft.letter.pop();
        }
        _ => {}
    }
    Ok(())
}

/// Key handling when the attachment list has focus.
fn handle_attachment_keys(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.attachment_selected + 1 < app.draft.attachments.len() {
                app.attachment_selected += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.attachment_selected > 0 {
                app.attachment_selected -= 1;
            }
        }
        KeyCode::Char('a') => {
            app.attach_input.clear();
            app.show_attach = true;
        }
        KeyCode::Char('x') | KeyCode::Delete => app.remove_selected_attachment(),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('e') => app.show_embed = true,
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
    Ok(())
}

/// Key handling when the attach-file popup is open.
fn handle_attach_popup(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    match key.code {
        KeyCode::Esc => app.show_attach = false,
        KeyCode::Enter => {
            let input = app.attach_input.clone();
            // Stay open on failure so the path can be corrected.
            if app.attach(&input) {
                app.show_attach = false;
                app.attach_input.clear();
            }
        }
        KeyCode::Backspace => {
            app.attach_input.pop();
        }
        KeyCode::Char(c) => app.attach_input.push(c),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::submit::SimulatedService;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn test_app() -> App {
        App::with_parts(
            "https://capsule.example.com/".into(),
            Box::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 1, 4).unwrap())),
            Box::new(SimulatedService::new(Duration::ZERO)),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut app = test_app();
        for c in "a@b.com".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.draft.email, "a@b.com");

        press(&mut app, KeyCode::Enter); // email → letter
        assert_eq!(app.focus, FormFocus::Letter);
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Enter); // newline inside the letter
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.draft.letter, "h\ni");
    }

    #[test]
    fn test_tab_cycles_focus_both_ways() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FormFocus::Letter);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FormFocus::Date);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FormFocus::Attachments);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FormFocus::Email);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, FormFocus::Attachments);
    }

    #[test]
    fn test_enter_on_date_submits_and_reports_validation_error() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab); // letter
        press(&mut app, KeyCode::Tab); // date
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.controller.error(),
            Some("Please fill in your email, letter, and a delivery date.")
        );
    }

    #[test]
    fn test_attach_popup_keeps_input_on_bad_path() {
        let mut app = test_app();
        app.focus = FormFocus::Attachments;
        press(&mut app, KeyCode::Char('a'));
        assert!(app.show_attach);
        for c in "/no/such/file.png".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!(app.show_attach, "popup stays open after a failed attach");
        assert!(app.draft.attachments.is_empty());
    }
}
