//! Popup for attaching a file by path.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the attach-file popup centered on screen.
pub fn render(frame: &mut Frame, app: &App) {
    let theme = current_theme();
    let area = centered_rect(60, 5, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(i18n::tui_attach_title())
        .style(theme.popup);

    let lines = vec![
        Line::from(Span::styled(i18n::tui_attach_prompt(), theme.help_dim)),
        Line::from(vec![
            Span::styled("> ", theme.prompt),
            Span::styled(app.attach_input.clone(), theme.field_value),
            Span::styled("\u{2588}", theme.prompt),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Calculate a centered rectangle with a percentage width and fixed height.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
