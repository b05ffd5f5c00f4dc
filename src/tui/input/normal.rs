use chrono::{Datelike, Local};
use tracing::{debug, info};

use crate::ops::TaskError;
use crate::ops::{context_ops, task_ops};
use crate::tui::action::Action;
use crate::tui::app::{App, InputPurpose, MoveState, Mode, TextField};

use super::*;

pub(super) fn handle_normal(app: &mut App, action: Action) {
    if app.moving.is_some() {
        handle_reposition(app, action);
        return;
    }

    match action {
        Action::MoveSelection(delta) => move_selection(app, delta),
        Action::SwitchContext(delta) => {
            context_ops::cycle_context(&mut app.contexts, delta);
            app.selected = 0;
        }
        Action::ToggleComplete => {
            mutate_selected(app, "toggled completion", |t| t.done = !t.done);
        }
        Action::StartAddTask => open_text_input(app, InputPurpose::AddTask, ""),
        Action::StartEditTask => {
            if let Some(text) = app.selected_task().map(|t| t.text.clone()) {
                open_text_input(app, InputPurpose::EditTask, &text);
            }
        }
        Action::DeleteTask => delete_selected(app),
        Action::StartAddContext => open_text_input(app, InputPurpose::AddContext, ""),
        Action::StartRenameContext => {
            let current = app.contexts.current.clone();
            open_text_input(app, InputPurpose::RenameContext, &current);
        }
        Action::StartDeleteContext => {
            if app.contexts.names.len() <= 1 {
                app.error = Some(TaskError::LastContext);
            } else {
                open_text_input(app, InputPurpose::ConfirmDeleteContext, "");
            }
        }
        Action::StartAddTag => {
            if app.selected_id().is_some() {
                open_text_input(app, InputPurpose::AddTag, "");
            }
        }
        Action::StartRemoveTag => start_remove_tag(app),
        Action::TogglePriority => {
            mutate_selected(app, "cycled priority", |t| t.priority = t.priority.cycle());
        }
        Action::StartSetDueDate => {
            if app.selected_id().is_some() {
                open_date_input(app);
            }
        }
        Action::ClearDueDate => {
            if app.selected_task().is_some_and(|t| t.has_due_date()) {
                mutate_selected(app, "cleared due date", |t| t.due_date.clear());
            }
        }
        Action::Undo => undo(app),
        Action::ToggleMoveMode => start_reposition(app),
        Action::OpenKanban => {
            app.kanban_scroll_x = 0;
            app.kanban_scroll_y = 0;
            app.mode = Mode::Kanban;
        }
        Action::OpenStats => app.mode = Mode::Statistics,
        Action::OpenHelp => app.show_help = true,
        Action::Quit => app.should_quit = true,
        _ => {}
    }
}

/// Move the highlight, wrapping around the filtered view
fn move_selection(app: &mut App, delta: isize) {
    let count = app.filtered_count();
    if count == 0 {
        return;
    }
    app.selected = (app.selected as isize + delta).rem_euclid(count as isize) as usize;
}

fn delete_selected(app: &mut App) {
    let Some(id) = app.selected_id() else {
        return;
    };
    app.capture_undo();
    task_ops::remove(&mut app.tasks, id);
    app.clamp_selection();
    info!(id, "deleted task");
    app.persist();
}

fn start_remove_tag(app: &mut App) {
    let Some(task) = app.selected_task() else {
        return;
    };
    if task.tags.is_empty() {
        app.error = Some(TaskError::NoTags);
        return;
    }
    let checks = vec![false; task.tags.len()];
    app.mode = Mode::TagRemoval { index: 0, checks };
}

/// Date dialog pre-filled with today's date
fn open_date_input(app: &mut App) {
    let today = Local::now().date_naive();
    app.mode = Mode::DateInput {
        fields: [
            TextField::with_text(format!("{:02}", today.day())),
            TextField::with_text(format!("{:02}", today.month())),
            TextField::with_text(today.year().to_string()),
        ],
        focus: 0,
    };
}

fn undo(app: &mut App) {
    match app.undo.restore() {
        Ok(snapshot) => {
            app.tasks = snapshot;
            context_ops::reconcile(&mut app.contexts, &app.tasks);
            app.selected = 0;
            debug!(remaining = app.undo.len(), "undo");
            app.persist();
        }
        Err(e) => app.error = Some(e),
    }
}

fn start_reposition(app: &mut App) {
    let Some(id) = app.selected_id() else {
        return;
    };
    app.moving = Some(MoveState {
        id,
        original: app.tasks.clone(),
    });
}

/// While repositioning only movement, finish, cancel, quit and help apply.
fn handle_reposition(app: &mut App, action: Action) {
    match action {
        Action::MoveSelection(delta) => {
            let context = app.contexts.current.clone();
            if let Some(pos) =
                task_ops::shift_within_context(&mut app.tasks, &context, app.selected, delta)
            {
                app.selected = pos;
            }
        }
        Action::ToggleMoveMode => finish_reposition(app),
        Action::Cancel => {
            if let Some(state) = app.moving.take() {
                app.tasks = state.original;
                app.select_id(state.id);
            }
        }
        Action::Quit => {
            finish_reposition(app);
            app.should_quit = true;
        }
        Action::OpenHelp => app.show_help = true,
        _ => {}
    }
}

/// Leave reposition. One undo entry covers the whole move.
fn finish_reposition(app: &mut App) {
    let Some(state) = app.moving.take() else {
        return;
    };
    if state.original != app.tasks {
        app.undo.push(state.original);
        debug!(id = state.id, "repositioned task");
        app.persist();
    }
}
