//! Top header bar showing the app name and workflow stage.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::{App, Screen};
use crate::tui::theme::current_theme;

/// Render the top header bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let stage = match app.screen() {
        Screen::Compose => i18n::tui_tagline(),
        Screen::Sealed => i18n::tui_sealed_title(),
    };

    let mut spans = vec![
        Span::styled(format!(" {}", i18n::app_name()), theme.header_bar),
        Span::styled(format!(" | {stage}"), theme.header_bar),
    ];

    if !app.draft.attachments.is_empty() {
        spans.push(Span::styled(
            format!(" | {} memories", app.draft.attachments.len()),
            theme.header_bar,
        ));
    }

    // Right-aligned help hint
    let left_len: usize = spans.iter().map(|s| s.content.len()).sum();
    let right_text = " [F1] Help ";
    if area.width as usize > left_len + right_text.len() {
        let padding = area.width as usize - left_len - right_text.len();
        spans.push(Span::styled(" ".repeat(padding), theme.header_bar));
    }
    spans.push(Span::styled(right_text, theme.header_bar));

    let line = Line::from(spans);
    let bar = Paragraph::new(line).style(theme.header_bar);
    frame.render_widget(bar, area);
}
