use tracing::debug;

use crate::model::task::Task;
use crate::ops::task_ops;
use crate::tui::action::TextEdit;
use crate::tui::app::{App, InputPurpose, Mode, TextField};
use crate::util::unicode;

/// Apply one editing action to a field. Inserts past `limit` characters and
/// control characters are dropped.
pub(super) fn apply_edit(field: &mut TextField, edit: TextEdit, limit: usize) {
    match edit {
        TextEdit::Insert(c) => {
            if c.is_control() || field.buffer.chars().count() >= limit {
                return;
            }
            field.buffer.insert(field.cursor, c);
            field.cursor += c.len_utf8();
        }
        TextEdit::Backspace => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&field.buffer, field.cursor) {
                field.buffer.replace_range(prev..field.cursor, "");
                field.cursor = prev;
            }
        }
        TextEdit::Delete => {
            if let Some(next) = unicode::next_grapheme_boundary(&field.buffer, field.cursor) {
                field.buffer.replace_range(field.cursor..next, "");
            }
        }
        TextEdit::Left => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&field.buffer, field.cursor) {
                field.cursor = prev;
            }
        }
        TextEdit::Right => {
            if let Some(next) = unicode::next_grapheme_boundary(&field.buffer, field.cursor) {
                field.cursor = next;
            }
        }
        TextEdit::Home => field.cursor = 0,
        TextEdit::End => field.cursor = field.buffer.len(),
    }
}

/// Open a text dialog for `purpose`, pre-filled with `initial`.
pub(super) fn open_text_input(app: &mut App, purpose: InputPurpose, initial: &str) {
    app.mode = Mode::TextInput {
        purpose,
        field: TextField::with_text(initial),
    };
}

/// Capture undo, apply `f` to the highlighted task, persist. Does nothing
/// when the current context has no tasks.
pub(super) fn mutate_selected<F>(app: &mut App, what: &str, f: F)
where
    F: FnOnce(&mut Task),
{
    let Some(id) = app.selected_id() else {
        return;
    };
    app.capture_undo();
    task_ops::mutate(&mut app.tasks, id, f);
    debug!(id, "{}", what);
    app.persist();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn field(text: &str, cursor: usize) -> TextField {
        TextField {
            buffer: text.to_string(),
            cursor,
        }
    }

    #[test]
    fn insert_at_cursor() {
        let mut f = field("ac", 1);
        apply_edit(&mut f, TextEdit::Insert('b'), 10);
        assert_eq!(f, field("abc", 2));
    }

    #[test]
    fn insert_respects_limit_and_rejects_control() {
        let mut f = field("abc", 3);
        apply_edit(&mut f, TextEdit::Insert('d'), 3);
        apply_edit(&mut f, TextEdit::Insert('\n'), 10);
        assert_eq!(f, field("abc", 3));
    }

    #[test]
    fn backspace_and_delete_remove_whole_graphemes() {
        let mut f = field("ae\u{301}b", 4); // "a" + "e" with combining acute + "b"
        apply_edit(&mut f, TextEdit::Backspace, 10);
        assert_eq!(f, field("ab", 1));
        apply_edit(&mut f, TextEdit::Delete, 10);
        assert_eq!(f, field("a", 1));
        apply_edit(&mut f, TextEdit::Delete, 10);
        assert_eq!(f, field("a", 1));
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut f = field("abc", 0);
        apply_edit(&mut f, TextEdit::Backspace, 10);
        assert_eq!(f, field("abc", 0));
    }

    #[test]
    fn cursor_motion() {
        let mut f = field("h\u{e9}llo", 0);
        apply_edit(&mut f, TextEdit::Right, 10);
        apply_edit(&mut f, TextEdit::Right, 10);
        assert_eq!(f.cursor, 3);
        apply_edit(&mut f, TextEdit::Left, 10);
        assert_eq!(f.cursor, 1);
        apply_edit(&mut f, TextEdit::End, 10);
        assert_eq!(f.cursor, f.buffer.len());
        apply_edit(&mut f, TextEdit::Right, 10);
        assert_eq!(f.cursor, f.buffer.len());
        apply_edit(&mut f, TextEdit::Home, 10);
        assert_eq!(f.cursor, 0);
    }
}
