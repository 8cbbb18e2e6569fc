//! Confirmation screen for a sealed capsule.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the sealed-capsule panel centered in the content area.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let Some(record) = app.record() else {
        return;
    };

    let width = area.width.min(70);
    let height = area.height.min(12);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let boxed = Rect::new(x, y, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.success)
        .title(Span::styled(
            format!(" \u{2714} {} ", i18n::tui_sealed_title()),
            theme.success,
        ));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(i18n::tui_sealed_stored(), theme.field_value)),
        Line::from(vec![
            Span::styled(format!("{} ", i18n::tui_sealed_send_to()), theme.field_value),
            Span::styled(record.email.clone(), theme.field_label),
            Span::styled(format!(" {} ", i18n::tui_sealed_on()), theme.field_value),
            Span::styled(record.long_delivery_date(), theme.field_label),
            Span::styled(".", theme.field_value),
        ]),
    ];

    if !record.attachments.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(
                "{}: {}",
                i18n::tui_label_attachments(),
                record.attachments.len()
            ),
            theme.field_value,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        i18n::tui_sealed_bye(),
        theme.help_dim,
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        i18n::tui_sealed_hints(),
        theme.help_dim,
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, boxed);
}
