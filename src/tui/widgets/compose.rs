//! The compose form: email, letter, delivery date and the inline error line.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use crate::i18n;
use crate::tui::app::{App, FormFocus};
use crate::tui::theme::{current_theme, Theme};

/// Render the form column.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // email
            Constraint::Min(6),    // letter
            Constraint::Length(3), // delivery date
            Constraint::Length(1), // error line
        ])
        .split(area);

    render_single_line(
        frame,
        rows[0],
        i18n::tui_label_email(),
        &app.draft.email,
        i18n::tui_email_placeholder(),
        app.focus == FormFocus::Email,
        &theme,
    );

    render_letter(frame, app, rows[1], &theme);

    let date_label = format!(
        "{} ({} {})",
        i18n::tui_label_date(),
        i18n::tui_date_min_hint(),
        app.min_date().format("%Y-%m-%d")
    );
    render_single_line(
        frame,
        rows[2],
        &date_label,
        &app.draft.delivery_date,
        "YYYY-MM-DD",
        app.focus == FormFocus::Date,
        &theme,
    );

    // Inline error, cleared while a submission is in flight
    if let Some(error) = app.controller.error() {
        let line = Paragraph::new(Line::from(Span::styled(format!(" {error}"), theme.error)));
        frame.render_widget(line, rows[3]);
    }
}

/// Render a bordered single-line input with a trailing cursor mark.
fn render_single_line(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
    theme: &Theme,
) {
    let block = field_block(label, focused, theme);
    let inner_width = area.width.saturating_sub(2) as usize;

    let line = if value.is_empty() && !focused {
        Line::from(Span::styled(placeholder.to_string(), theme.placeholder))
    } else {
        // Keep the tail visible once the value outgrows the field.
        let visible = tail_fitting(value, inner_width.saturating_sub(1));
        let mut spans = vec![Span::styled(visible, theme.field_value)];
        if focused {
            spans.push(Span::styled("\u{2588}", theme.prompt));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the multi-line letter editor.
fn render_letter(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let focused = app.focus == FormFocus::Letter;
    let block = field_block(i18n::tui_label_letter(), focused, theme);

    let paragraph = if app.draft.letter.is_empty() && !focused {
        Paragraph::new(Span::styled(
            i18n::tui_letter_placeholder().to_string(),
            theme.placeholder,
        ))
    } else {
        let mut text = app.draft.letter.clone();
        if focused {
            text.push('\u{2588}');
        }
        Paragraph::new(text).style(theme.field_value)
    };

    frame.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}

fn field_block<'a>(label: &str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused {
        theme.border_focused
    } else {
        theme.border
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(format!(" {label} "), theme.field_label))
}

/// The longest suffix of `value` that fits in `width` terminal columns.
fn tail_fitting(value: &str, width: usize) -> String {
    let mut used = 0;
    let mut chars: Vec<char> = Vec::new();
    for c in value.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        chars.push(c);
    }
    chars.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_fitting_keeps_suffix() {
        assert_eq!(tail_fitting("hello", 10), "hello");
        assert_eq!(tail_fitting("hello", 3), "llo");
        assert_eq!(tail_fitting("", 5), "");
    }

    #[test]
    fn test_tail_fitting_counts_wide_chars() {
        // Each CJK char is two columns wide.
        assert_eq!(tail_fitting("ab\u{5c71}\u{7530}", 4), "\u{5c71}\u{7530}");
        assert_eq!(tail_fitting("ab\u{5c71}\u{7530}", 5), "b\u{5c71}\u{7530}");
    }
}
