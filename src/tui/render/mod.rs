pub mod dialogs;
pub mod help_overlay;
pub mod helpers;
pub mod kanban_view;
pub mod list_view;
pub mod stats_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, Mode};

/// Main render function. Reads the app, never changes it.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title (1 row) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    match &app.mode {
        Mode::Kanban => {
            render_title(frame, app, chunks[0], "Kanban Board".to_string());
            kanban_view::render_kanban_view(frame, app, chunks[1]);
        }
        Mode::Statistics => {
            render_title(frame, app, chunks[0], "Statistics".to_string());
            stats_view::render_stats_view(frame, app, chunks[1]);
        }
        _ => {
            let position = app.contexts.current_index().map_or(0, |i| i + 1);
            let title = format!(
                "Context: {} ({}/{})",
                app.current_context(),
                position,
                app.contexts.names.len()
            );
            render_title(frame, app, chunks[0], title);
            list_view::render_list_view(frame, app, chunks[1]);
        }
    }

    // Dialogs float over the list
    match &app.mode {
        Mode::TextInput { purpose, field } => {
            dialogs::render_text_dialog(frame, app, *purpose, field, area);
        }
        Mode::DateInput { fields, focus } => {
            dialogs::render_date_dialog(frame, app, fields, *focus, area);
        }
        Mode::TagRemoval { index, checks } => {
            dialogs::render_tag_dialog(frame, app, *index, checks, area);
        }
        _ => {}
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect, title: String) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(app.theme.title_fg)
                .bg(app.theme.title_bg)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(app.theme.background)),
        area,
    );
}
