use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::Task;
use crate::tui::action::Action;
use crate::tui::app::App;
use crate::tui::keymap::KeyContext;
use crate::util::unicode;

use super::helpers::{checkbox, spans_width, task_summary};

/// Render the current context's tasks, keeping the selection in view
pub fn render_list_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let tasks = app.filtered();

    if tasks.is_empty() {
        let add_key = app
            .keymap
            .display_for(KeyContext::Normal, Action::StartAddTask)
            .unwrap_or_else(|| "a".to_string());
        let line = Line::from(Span::styled(
            format!("  No tasks in this context. Press '{}' to add one.", add_key),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let height = area.height as usize;
    let offset = app.selected.saturating_sub(height.saturating_sub(1));
    let lines: Vec<Line> = tasks
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, task)| task_line(app, task, i == app.selected, area.width as usize))
        .collect();

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn task_line<'a>(app: &App, task: &Task, selected: bool, width: usize) -> Line<'a> {
    let theme = &app.theme;
    let moving = app.moving.as_ref().is_some_and(|m| m.id == task.id);
    let bg = if moving {
        theme.moving_bg
    } else if selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = Style::default().bg(bg);

    let cursor = match (selected, moving) {
        (_, true) => " \u{2195} ",
        (true, false) => " \u{25B8} ",
        (false, false) => "   ",
    };
    let mut spans = vec![Span::styled(cursor, base.fg(theme.accent))];

    let marker = task.priority.marker();
    if !marker.is_empty() {
        spans.push(Span::styled(
            format!("{marker} "),
            base.fg(theme.priority_color(task.priority))
                .add_modifier(Modifier::BOLD),
        ));
    }

    let check_style = if task.done {
        base.fg(theme.done)
    } else {
        base.fg(theme.dim)
    };
    spans.push(Span::styled(format!("{} ", checkbox(task.done)), check_style));

    let text_style = if task.done {
        base.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
    } else if selected {
        base.fg(theme.accent)
    } else {
        base.fg(theme.text)
    };
    let text_style = if moving {
        text_style.add_modifier(Modifier::BOLD)
    } else {
        text_style
    };

    let remaining = width.saturating_sub(spans_width(&spans));
    let summary = unicode::truncate_to_width(&task_summary(task), remaining);
    let used = spans_width(&spans) + unicode::display_width(&summary);
    spans.push(Span::styled(summary, text_style));
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), base));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use crate::tui::app::MoveState;
    use crate::tui::render::test_helpers::*;

    fn render(app: &App, w: u16, h: u16) -> String {
        render_to_string(w, h, |frame, area| render_list_view(frame, app, area))
    }

    #[test]
    fn seed_tasks_render_in_order_with_checkboxes() {
        let app = seed_app();
        let out = render(&app, TERM_W, 10);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("\u{25B8} [ ] Welcome to your todo app!"));
        assert!(lines[2].contains("[\u{2713}] Press space to toggle completion"));
        assert!(lines[4].contains("Press '?' to see more keybindings"));
    }

    #[test]
    fn priority_tags_and_due_date_are_shown() {
        let mut app = app_with_tasks(&[("Pay rent", "Home")]);
        app.tasks[0].priority = Priority::High;
        app.tasks[0].tags = vec!["money".into()];
        app.tasks[0].due_date = "2024-07-01".into();
        let out = render(&app, TERM_W, 3);
        assert!(out.contains("!!! [ ] Pay rent > money [Due: 2024-07-01]"));
    }

    #[test]
    fn empty_context_shows_hint() {
        let mut app = app_with_tasks(&[("a", "Home")]);
        app.contexts.names.push("Empty".into());
        app.contexts.current = "Empty".into();
        let out = render(&app, TERM_W, 3);
        assert!(out.contains("No tasks in this context. Press 'a' to add one."));
    }

    #[test]
    fn selection_scrolls_into_view() {
        let names: Vec<String> = (1..=10).map(|i| format!("task {i}")).collect();
        let pairs: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "Work")).collect();
        let mut app = app_with_tasks(&pairs);
        app.selected = 9;
        let out = render(&app, TERM_W, 4);
        assert!(!out.contains("task 6"));
        assert!(out.contains("task 7"));
        assert!(out.contains("\u{25B8} [ ] task 10"));
    }

    #[test]
    fn moving_task_is_marked() {
        let mut app = app_with_tasks(&[("first", "Work"), ("second", "Work")]);
        app.moving = Some(MoveState {
            id: 1,
            original: app.tasks.clone(),
        });
        let out = render(&app, TERM_W, 3);
        assert!(out.lines().next().unwrap().contains("\u{2195} [ ] first"));
    }

    #[test]
    fn long_text_is_truncated() {
        let long = "x".repeat(100);
        let app = app_with_tasks(&[(long.as_str(), "Work")]);
        let out = render(&app, 30, 2);
        assert!(out.ends_with('\u{2026}'));
        assert!(unicode::display_width(&out) <= 30);
    }
}
