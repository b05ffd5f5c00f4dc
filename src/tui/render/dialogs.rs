use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, DATE_FIELD_LABELS, InputPurpose, TextField};
use crate::util::unicode;

use super::helpers::{centered_fixed, checkbox};

const DIALOG_WIDTH: u16 = 60;

fn dialog_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    let bg = app.theme.background;
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(app.theme.bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.context).bg(bg))
        .style(Style::default().bg(bg))
}

fn prompt(app: &App, purpose: InputPurpose) -> String {
    match purpose {
        InputPurpose::AddTask => format!("Add a task to '{}':", app.current_context()),
        InputPurpose::EditTask => "Edit task:".to_string(),
        InputPurpose::AddContext => "Name of the new context:".to_string(),
        InputPurpose::RenameContext => format!("Rename '{}' to:", app.current_context()),
        InputPurpose::AddTag => "Tag to add:".to_string(),
        InputPurpose::ConfirmDeleteContext => format!(
            "Delete '{}' and all its tasks? Type y to confirm:",
            app.current_context()
        ),
    }
}

/// Spans for an editable field with a block cursor, scrolled so the cursor
/// stays within `width` cells.
fn field_spans<'a>(app: &App, field: &TextField, width: usize, focused: bool) -> Vec<Span<'a>> {
    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.bright).bg(bg);
    if !focused {
        return vec![Span::styled(
            unicode::truncate_to_width(&field.buffer, width),
            Style::default().fg(app.theme.text).bg(bg),
        )];
    }

    let cursor_col = unicode::byte_offset_to_display_col(&field.buffer, field.cursor);
    let start_col = cursor_col.saturating_sub(width.saturating_sub(1));
    let start = unicode::display_col_to_byte_offset(&field.buffer, start_col).min(field.cursor);

    let before = &field.buffer[start..field.cursor];
    let under = unicode::grapheme_at(&field.buffer, field.cursor);
    let after_start = field.cursor + under.len();
    let after = &field.buffer[after_start..];
    let after_width = width.saturating_sub(unicode::display_width(before) + 1);

    vec![
        Span::styled(before.to_string(), text_style),
        Span::styled(
            (if under.is_empty() { " " } else { under }).to_string(),
            Style::default().fg(app.theme.selection_bg).bg(app.theme.accent),
        ),
        Span::styled(unicode::truncate_to_width(after, after_width), text_style),
    ]
}

/// Single-line text dialog
pub fn render_text_dialog(
    frame: &mut Frame,
    app: &App,
    purpose: InputPurpose,
    field: &TextField,
    area: Rect,
) {
    let popup = centered_fixed(DIALOG_WIDTH, 6, area);
    frame.render_widget(Clear, popup);

    let inner_width = popup.width.saturating_sub(4) as usize;
    let bg = app.theme.background;
    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", prompt(app, purpose)),
            Style::default().fg(app.theme.text).bg(bg),
        )),
        Line::from(""),
        Line::from(
            std::iter::once(Span::styled(" ", Style::default().bg(bg)))
                .chain(field_spans(app, field, inner_width, true))
                .collect::<Vec<_>>(),
        ),
    ];

    let paragraph = Paragraph::new(lines)
        .block(dialog_block(app, purpose.title()))
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup);
}

/// Day / month / year dialog
pub fn render_date_dialog(
    frame: &mut Frame,
    app: &App,
    fields: &[TextField; 3],
    focus: usize,
    area: Rect,
) {
    let popup = centered_fixed(DIALOG_WIDTH, 8, area);
    frame.render_widget(Clear, popup);

    let bg = app.theme.background;
    let mut lines = vec![
        Line::from(Span::styled(
            " Set due date (type 'clear' to remove it):",
            Style::default().fg(app.theme.text).bg(bg),
        )),
        Line::from(""),
    ];
    for (i, (label, field)) in DATE_FIELD_LABELS.iter().zip(fields).enumerate() {
        let focused = i == focus;
        let label_style = if focused {
            Style::default()
                .fg(app.theme.accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        let mut spans = vec![Span::styled(format!(" {:<8}", format!("{label}:")), label_style)];
        spans.extend(field_spans(app, field, 8, focused));
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines)
        .block(dialog_block(app, "Due Date"))
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup);
}

/// Checklist of the selected task's tags
pub fn render_tag_dialog(
    frame: &mut Frame,
    app: &App,
    index: usize,
    checks: &[bool],
    area: Rect,
) {
    let tags: &[String] = app.selected_task().map(|t| t.tags.as_slice()).unwrap_or(&[]);
    let height = (tags.len() as u16).saturating_add(4);
    let popup = centered_fixed(DIALOG_WIDTH, height, area);
    frame.render_widget(Clear, popup);

    let bg = app.theme.background;
    let mut lines = vec![
        Line::from(Span::styled(
            " Select tags to remove:",
            Style::default().fg(app.theme.text).bg(bg),
        )),
        Line::from(""),
    ];
    for (i, tag) in tags.iter().enumerate() {
        let checked = checks.get(i).copied().unwrap_or(false);
        let style = if i == index {
            Style::default()
                .fg(app.theme.bright)
                .bg(app.theme.selection_bg)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        lines.push(Line::from(Span::styled(
            format!(" {} {}", checkbox(checked), tag),
            style,
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(dialog_block(app, "Remove Tags"))
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn text_dialog_shows_prompt_and_buffer() {
        let app = seed_app();
        let field = TextField::with_text("Buy milk");
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_text_dialog(frame, &app, InputPurpose::AddTask, &field, area)
        });
        assert!(out.contains(" New Task "));
        assert!(out.contains("Add a task to 'Getting Started':"));
        assert!(out.contains("Buy milk"));
    }

    #[test]
    fn long_buffer_scrolls_to_cursor() {
        let app = seed_app();
        let text = format!("{}END", "a".repeat(150));
        let field = TextField::with_text(text);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_text_dialog(frame, &app, InputPurpose::EditTask, &field, area)
        });
        assert!(out.contains("aaaEND"));
    }

    #[test]
    fn date_dialog_lists_three_fields() {
        let app = seed_app();
        let fields = [
            TextField::with_text("15"),
            TextField::with_text("06"),
            TextField::with_text("2024"),
        ];
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_date_dialog(frame, &app, &fields, 1, area)
        });
        assert!(out.contains("Day:    15"));
        assert!(out.contains("Month:  06"));
        assert!(out.contains("Year:   2024"));
    }

    #[test]
    fn tag_dialog_shows_checks() {
        let mut app = seed_app();
        app.tasks[0].tags = vec!["home".into(), "urgent".into()];
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_tag_dialog(frame, &app, 1, &[false, true], area)
        });
        assert!(out.contains("[ ] home"));
        assert!(out.contains("[\u{2713}] urgent"));
    }
}
