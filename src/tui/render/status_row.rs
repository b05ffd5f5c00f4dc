use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::action::{Action, Axis};
use crate::tui::app::{App, Mode};
use crate::tui::keymap::KeyContext;
use crate::util::unicode;

use super::helpers::spans_width;

type Hints = &'static [(Action, &'static str)];

const MOVE_HINTS: Hints = &[
    (Action::MoveSelection(1), "move"),
    (Action::ToggleMoveMode, "done"),
    (Action::Cancel, "cancel"),
];
const NORMAL_HINTS: Hints = &[
    (Action::StartAddTask, "add"),
    (Action::ToggleComplete, "toggle"),
    (Action::SwitchContext(1), "context"),
    (Action::Undo, "undo"),
    (Action::OpenHelp, "help"),
    (Action::Quit, "quit"),
];
const INPUT_HINTS: Hints = &[(Action::Commit, "confirm"), (Action::Cancel, "cancel")];
const DATE_HINTS: Hints = &[
    (Action::FieldNav(1), "next field"),
    (Action::Commit, "confirm"),
    (Action::Cancel, "cancel"),
];
const TAG_HINTS: Hints = &[
    (Action::ToggleCheck, "check"),
    (Action::Commit, "remove"),
    (Action::Cancel, "cancel"),
];
const KANBAN_HINTS: Hints = &[
    (Action::Scroll(Axis::Horizontal, 1), "scroll"),
    (Action::Exit, "back"),
];
const STATS_HINTS: Hints = &[(Action::Exit, "back")];

/// Key hints for the current mode as `(action, label)` pairs
fn hint_actions(app: &App) -> (KeyContext, Hints) {
    if app.moving.is_some() {
        return (KeyContext::Normal, MOVE_HINTS);
    }
    match app.mode {
        Mode::Normal => (KeyContext::Normal, NORMAL_HINTS),
        Mode::TextInput { .. } => (KeyContext::Input, INPUT_HINTS),
        Mode::DateInput { .. } => (KeyContext::Date, DATE_HINTS),
        Mode::TagRemoval { .. } => (KeyContext::Tags, TAG_HINTS),
        Mode::Kanban => (KeyContext::Kanban, KANBAN_HINTS),
        Mode::Statistics => (KeyContext::Stats, STATS_HINTS),
    }
}

/// Render the status row (bottom of screen): the last error on the left,
/// key hints on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if let Some(err) = &app.error {
        spans.push(Span::styled(
            format!(" {}", unicode::truncate_to_width(&err.to_string(), width.saturating_sub(1))),
            Style::default()
                .fg(app.theme.error)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    } else if app.moving.is_some() {
        spans.push(Span::styled(
            " MOVE",
            Style::default()
                .fg(app.theme.accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if app.show_key_hints && !app.show_help {
        let (context, actions) = hint_actions(app);
        let hint = actions
            .iter()
            .filter_map(|(action, label)| {
                app.keymap
                    .primary_key(context, *action)
                    .map(|key| format!("{key} {label}"))
            })
            .collect::<Vec<_>>()
            .join("  ");
        let hint = format!("{hint} ");
        let content_width = spans_width(&spans);
        let hint_width = unicode::display_width(&hint);
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
