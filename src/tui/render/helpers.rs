use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::model::task::Task;
use crate::util::unicode;

/// Checkbox symbol for a task's completion state
pub(super) fn checkbox(done: bool) -> &'static str {
    if done { "[\u{2713}]" } else { "[ ]" }
}

/// Task text followed by its tags and due date, e.g.
/// `Write report > work, q3 [Due: 2024-06-01]`
pub(super) fn task_summary(task: &Task) -> String {
    let mut text = task.text.clone();
    if !task.tags.is_empty() {
        text.push_str(" > ");
        text.push_str(&task.tags.join(", "));
    }
    if task.has_due_date() {
        text.push_str(&format!(" [Due: {}]", task.due_date));
    }
    text
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit
pub(super) fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_includes_tags_and_due_date() {
        let mut task = Task::new(1, "Write report", "Work");
        assert_eq!(task_summary(&task), "Write report");
        task.tags = vec!["work".into(), "q3".into()];
        task.due_date = "2024-06-01".into();
        assert_eq!(
            task_summary(&task),
            "Write report > work, q3 [Due: 2024-06-01]"
        );
    }

    #[test]
    fn centered_fixed_clamps_to_area() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_fixed(40, 10, area), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_fixed(100, 30, area), area);
    }
}
