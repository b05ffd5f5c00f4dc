use tracing::info;

use crate::ops::{context_ops, task_ops};
use crate::tui::action::Action;
use crate::tui::app::{App, InputPurpose, Mode, TEXT_LIMIT};

use super::*;

pub(super) fn handle_text_input(app: &mut App, action: Action) {
    match action {
        Action::Cancel => app.mode = Mode::Normal,
        Action::Commit => {
            let Mode::TextInput { purpose, field } = std::mem::replace(&mut app.mode, Mode::Normal)
            else {
                return;
            };
            commit_text(app, purpose, field.buffer.trim());
        }
        Action::Edit(edit) => {
            if let Mode::TextInput { field, .. } = &mut app.mode {
                apply_edit(field, edit, TEXT_LIMIT);
            }
        }
        _ => {}
    }
}

/// Apply a committed dialog value. Empty input does nothing.
fn commit_text(app: &mut App, purpose: InputPurpose, input: &str) {
    if input.is_empty() {
        return;
    }
    match purpose {
        InputPurpose::AddTask => {
            app.capture_undo();
            let context = app.contexts.current.clone();
            let id = task_ops::append(&mut app.tasks, &mut app.next_id, input, &context);
            app.select_id(id);
            info!(id, context = %context, "added task");
            app.persist();
        }
        InputPurpose::EditTask => {
            if app.selected_task().is_some_and(|t| t.text != input) {
                mutate_selected(app, "edited task", |t| t.text = input.to_string());
            }
        }
        InputPurpose::AddTag => {
            if app
                .selected_task()
                .is_some_and(|t| !t.tags.iter().any(|tag| tag == input))
            {
                mutate_selected(app, "added tag", |t| {
                    t.add_tag(input);
                });
            }
        }
        InputPurpose::AddContext => match context_ops::add_context(&mut app.contexts, input) {
            Ok(()) => {
                app.selected = 0;
                info!(context = input, "added context");
                app.persist();
            }
            Err(e) => app.error = Some(e),
        },
        InputPurpose::RenameContext => {
            let snapshot = app.tasks.clone();
            let old = app.contexts.current.clone();
            match context_ops::rename_context(&mut app.contexts, &mut app.tasks, &old, input) {
                Ok(true) => {
                    app.undo.push(snapshot);
                    info!(from = %old, to = input, "renamed context");
                    app.persist();
                }
                Ok(false) => {}
                Err(e) => app.error = Some(e),
            }
        }
        InputPurpose::ConfirmDeleteContext => {
            if !input.eq_ignore_ascii_case("y") {
                return;
            }
            let snapshot = app.tasks.clone();
            let name = app.contexts.current.clone();
            match context_ops::delete_context(&mut app.contexts, &mut app.tasks, &name) {
                Ok(removed) => {
                    app.undo.push(snapshot);
                    app.selected = 0;
                    info!(context = %name, removed, "deleted context");
                    app.persist();
                }
                Err(e) => app.error = Some(e),
            }
        }
    }
}
