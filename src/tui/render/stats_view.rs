use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::stats;
use crate::tui::app::App;

/// Render completion statistics for every task
pub fn render_stats_view(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    let label = bg.fg(theme.text);
    let value = bg.fg(theme.bright).add_modifier(Modifier::BOLD);
    let header = bg.fg(theme.accent).add_modifier(Modifier::BOLD);

    let today = Local::now().date_naive();
    let s = stats::compute(&app.tasks, &app.contexts.names, today);

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Total Tasks: ", label),
            Span::styled(s.total.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("  Completed: ", label),
            Span::styled(format!("{} ({:.1}%)", s.completed, s.rate()), value),
        ]),
        Line::from(vec![
            Span::styled("  Overdue: ", label),
            Span::styled(
                s.overdue.to_string(),
                if s.overdue > 0 { value.fg(theme.error) } else { value },
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Priorities:", header)),
    ];
    for (priority, count) in &s.by_priority {
        lines.push(Line::from(vec![
            Span::styled(
                format!("    {:<8}", priority.label()),
                bg.fg(theme.priority_color(*priority)),
            ),
            Span::styled(count.to_string(), label),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Context Statistics:", header)));
    for ctx in &s.contexts {
        lines.push(Line::from(vec![
            Span::styled(
                format!("    {}", ctx.name),
                bg.fg(theme.context).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(": {}/{} ({:.1}%)", ctx.completed, ctx.total, ctx.rate()),
                label,
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).style(bg), area);
}
