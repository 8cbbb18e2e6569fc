//! Popup showing the HTML embed snippet for the capsule page.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::embed;
use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the embed popup centered on screen.
pub fn render(frame: &mut Frame, app: &App) {
    let theme = current_theme();
    let area = centered_rect(70, 40, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(i18n::tui_embed_title())
        .style(theme.popup);

    let snippet = embed::embed_snippet(&app.embed_url);
    let lines = vec![
        Line::from(Span::styled(i18n::tui_embed_hint(), theme.help_dim)),
        Line::from(""),
        Line::from(Span::styled(snippet, theme.field_value)),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Calculate a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
