use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::task_ops;
use crate::tui::app::{App, KANBAN_COLUMN_WIDTH, KANBAN_SEPARATOR};
use crate::util::unicode;

use super::helpers::task_summary;

/// Render one column per context, starting at the horizontal scroll offset
/// and skipping `kanban_scroll_y` board lines.
pub fn render_kanban_view(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    let col_width = KANBAN_COLUMN_WIDTH as usize;
    let text_width = col_width - 2;

    let visible: Vec<&String> = app
        .contexts
        .names
        .iter()
        .skip(app.kanban_scroll_x)
        .take(app.kanban_visible_columns())
        .collect();

    // Each column is a list of already-padded cells, one per board line
    let mut cells: Vec<Vec<Span>> = Vec::with_capacity(visible.len());
    for name in &visible {
        let mut column = vec![
            Span::styled(
                unicode::pad_to_width(&unicode::truncate_to_width(name, col_width), col_width),
                bg.fg(theme.context).add_modifier(Modifier::BOLD),
            ),
            Span::styled("\u{2500}".repeat(col_width), bg.fg(theme.dim)),
        ];
        for task in task_ops::filtered_view(&app.tasks, name) {
            let (bullet, style) = if task.done {
                ("\u{2713} ", bg.fg(theme.done).add_modifier(Modifier::CROSSED_OUT))
            } else {
                ("\u{2022} ", bg.fg(theme.text))
            };
            let text = unicode::truncate_to_width(&task_summary(task), text_width);
            column.push(Span::styled(
                unicode::pad_to_width(&format!("{bullet}{text}"), col_width),
                style,
            ));
        }
        cells.push(column);
    }

    let board_height = cells.iter().map(Vec::len).max().unwrap_or(0);
    let separator = " ".repeat(KANBAN_SEPARATOR as usize);
    let blank = " ".repeat(col_width);

    let lines: Vec<Line> = (app.kanban_scroll_y..board_height)
        .take(area.height as usize)
        .map(|row| {
            let mut spans = Vec::new();
            for (i, column) in cells.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(separator.clone(), bg));
                }
                match column.get(row) {
                    Some(cell) => spans.push(cell.clone()),
                    None => spans.push(Span::styled(blank.clone(), bg)),
                }
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).style(bg), area);
}
