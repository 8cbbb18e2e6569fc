//! Help popup showing keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::{current_theme, Theme};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the help popup centered on screen.
pub fn render(frame: &mut Frame, _app: &App) {
    let theme = current_theme();
    let screen = frame.area();

    let lines = build_lines(&theme);

    let popup_width = 56u16.min(screen.width.saturating_sub(4));
    let popup_height = (lines.len() as u16 + 2).min(screen.height.saturating_sub(2));
    let area = centered_rect_exact(popup_width, popup_height, screen);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(i18n::tui_help_title())
        .style(theme.popup);

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Build all the help content lines.
fn build_lines<'a>(theme: &Theme) -> Vec<Line<'a>> {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(format!("  {}", i18n::app_name()), theme.popup_title),
        Span::styled(format!("  v{VERSION}"), theme.help_dim),
    ]));
    lines.push(Line::from(""));

    let shortcuts: &[(&str, &str)] = &[
        ("Tab / Shift+Tab", i18n::tui_hint_next_field()),
        ("Ctrl+S", i18n::tui_hint_seal()),
        ("Enter (date field)", i18n::tui_hint_seal()),
        ("a (memories list)", i18n::tui_hint_attach()),
        ("x (memories list)", i18n::tui_hint_remove()),
        ("j/k (memories list)", i18n::tui_hint_nav()),
        ("Ctrl+E", i18n::tui_hint_embed()),
        ("n (sealed screen)", i18n::tui_hint_another()),
        ("F1 / ?", i18n::tui_hint_help()),
        ("Ctrl+C", i18n::tui_hint_quit()),
    ];

    for (key, desc) in shortcuts {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<20}"), theme.prompt),
            Span::styled((*desc).to_string(), theme.field_value),
        ]));
    }
    lines.push(Line::from(""));

    lines
}

/// Calculate a centered rectangle with exact dimensions.
fn centered_rect_exact(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
