//! Attachment list with per-file preview state.

use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::i18n;
use crate::model::Preview;
use crate::tui::app::{App, FormFocus};
use crate::tui::theme::current_theme;

/// Render the attachment panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let focused = app.focus == FormFocus::Attachments;

    let border = if focused {
        theme.border_focused
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(
            format!(" {} ", i18n::tui_label_attachments()),
            theme.field_label,
        ));

    if app.draft.attachments.is_empty() {
        let hint = Paragraph::new(i18n::tui_no_attachments())
            .style(theme.placeholder)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(hint, area);
        return;
    }

    let rows: Vec<Row> = app
        .draft
        .attachments
        .iter()
        .enumerate()
        .map(|(i, att)| {
            let selected = focused && i == app.attachment_selected;
            let marker = if selected { ">" } else { " " };
            let style = if selected {
                theme.list_selected
            } else {
                theme.list_normal
            };
            let size = humansize::format_size(att.size, humansize::BINARY);
            let (tag, tag_style) = match &att.preview {
                Preview::Pending => ("\u{2026}", theme.pending),
                Preview::Thumbnail(_) => ("IMG", theme.attachment),
                Preview::Unpreviewable => ("DOC", theme.list_normal),
            };
            let tag_style = if selected { theme.list_selected } else { tag_style };
            Row::new(vec![
                Cell::from(marker).style(style),
                Cell::from(att.filename.clone()).style(style),
                Cell::from(att.content_type.clone()).style(style),
                Cell::from(size).style(style),
                Cell::from(tag).style(tag_style),
            ])
        })
        .collect();

    let header = Row::new(vec![
        Cell::from("").style(theme.list_header),
        Cell::from(i18n::tui_col_filename()).style(theme.list_header),
        Cell::from(i18n::tui_col_type()).style(theme.list_header),
        Cell::from(i18n::tui_col_size()).style(theme.list_header),
        Cell::from(i18n::tui_col_preview()).style(theme.list_header),
    ]);

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Min(12),
            Constraint::Length(18),
            Constraint::Length(10),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(block)
    .column_spacing(1);

    frame.render_widget(table, area);
}
