//! Main render function that dispatches to widgets.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use super::app::{App, Screen};
use super::widgets;

/// Render the entire TUI frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    // Vertical layout: header (1) + content (flex) + status (1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header bar
            Constraint::Min(10),   // content
            Constraint::Length(1), // status bar
        ])
        .split(size);

    // Header bar
    widgets::header_bar::render(frame, app, vertical[0]);

    // Main content — depends on the workflow screen
    match app.screen() {
        Screen::Compose => {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(vertical[1]);
            widgets::compose::render(frame, app, split[0]);
            widgets::attachments::render(frame, app, split[1]);
        }
        Screen::Sealed => {
            widgets::sealed::render(frame, app, vertical[1]);
        }
    }

    // Status bar
    widgets::status_bar::render(frame, app, vertical[2]);

    // Popups (rendered on top of everything)
    if app.show_help {
        widgets::help_popup::render(frame, app);
    }
    if app.show_attach {
        widgets::attach_popup::render(frame, app);
    }
    if app.show_embed {
        widgets::embed_popup::render(frame, app);
    }
}
