use chrono::NaiveDate;
use tracing::debug;

use crate::ops::TaskError;
use crate::tui::action::Action;
use crate::tui::app::{App, DATE_FIELD_LIMIT, Mode, TextField};

use super::*;

/// What a committed date dialog asks for
#[derive(Debug, PartialEq, Eq)]
enum DateCommit {
    Set(String),
    Clear,
    Nothing,
}

pub(super) fn handle_date_input(app: &mut App, action: Action) {
    match action {
        Action::Cancel => app.mode = Mode::Normal,
        Action::FieldNav(delta) => {
            if let Mode::DateInput { focus, fields } = &mut app.mode {
                let len = fields.len() as isize;
                *focus = (*focus as isize + delta).rem_euclid(len) as usize;
            }
        }
        Action::Edit(edit) => {
            if let Mode::DateInput { fields, focus } = &mut app.mode
                && let Some(field) = fields.get_mut(*focus)
            {
                apply_edit(field, edit, DATE_FIELD_LIMIT);
            }
        }
        Action::Commit => {
            let Mode::DateInput { fields, .. } = std::mem::replace(&mut app.mode, Mode::Normal)
            else {
                return;
            };
            match parse_date_fields(&fields) {
                Ok(DateCommit::Set(date)) => {
                    if app.selected_task().is_some_and(|t| t.due_date != date) {
                        debug!(due = %date, "setting due date");
                        mutate_selected(app, "set due date", |t| t.due_date = date);
                    }
                }
                Ok(DateCommit::Clear) => {
                    if app.selected_task().is_some_and(|t| t.has_due_date()) {
                        mutate_selected(app, "cleared due date", |t| t.due_date.clear());
                    }
                }
                Ok(DateCommit::Nothing) => {}
                Err(e) => app.error = Some(e),
            }
        }
        _ => {}
    }
}

/// Interpret day, month and year sub-fields. Any field reading "clear"
/// clears the date; all-empty fields leave it alone; otherwise the fields
/// must form a real calendar date, normalized to `YYYY-MM-DD`.
fn parse_date_fields(fields: &[TextField; 3]) -> Result<DateCommit, TaskError> {
    let [day, month, year] = fields.each_ref().map(|f| f.buffer.trim());
    if [day, month, year]
        .iter()
        .any(|v| v.eq_ignore_ascii_case("clear"))
    {
        return Ok(DateCommit::Clear);
    }
    if day.is_empty() && month.is_empty() && year.is_empty() {
        return Ok(DateCommit::Nothing);
    }
    if !all_digits(day, 1..=2) || !all_digits(month, 1..=2) || !all_digits(year, 4..=4) {
        return Err(TaskError::InvalidDateFormat);
    }
    let raw = format!("{year}-{month}-{day}");
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(|date| DateCommit::Set(date.format("%Y-%m-%d").to_string()))
        .map_err(|_| TaskError::InvalidDateFormat)
}

/// Plain ASCII digits, no sign, with a length in `len`
fn all_digits(value: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}
