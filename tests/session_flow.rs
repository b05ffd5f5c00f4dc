//! End-to-end session tests.
//!
//! Each test drives the public state machine with abstract actions, the same
//! way the event loop does after key translation, and checks the resulting
//! task collection, context registry and selection.

use ctxdo::io::store_io::Storage;
use ctxdo::model::{Config, Document, Priority, Task};
use ctxdo::ops::TaskError;
use ctxdo::tui::action::{Action, TextEdit};
use ctxdo::tui::app::{App, Mode};
use ctxdo::tui::input::dispatch;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn doc(tasks: &[(&str, &str)]) -> Document {
    let tasks: Vec<Task> = tasks
        .iter()
        .zip(1..)
        .map(|((text, ctx), id)| Task::new(id, *text, *ctx))
        .collect();
    let mut contexts: Vec<String> = tasks.iter().map(|t| t.context.clone()).collect();
    contexts.dedup();
    Document {
        next_id: tasks.len() as u64 + 1,
        tasks,
        contexts,
    }
}

/// Replace whatever the focused dialog field holds with `text`
fn fill(app: &mut App, text: &str) {
    dispatch(app, Action::Edit(TextEdit::End));
    for _ in 0..256 {
        dispatch(app, Action::Edit(TextEdit::Backspace));
    }
    for c in text.chars() {
        dispatch(app, Action::Edit(TextEdit::Insert(c)));
    }
}

fn submit(app: &mut App, start: Action, text: &str) {
    dispatch(app, start);
    fill(app, text);
    dispatch(app, Action::Commit);
}

fn texts(app: &App) -> Vec<String> {
    app.filtered().iter().map(|t| t.text.clone()).collect()
}

#[test]
fn seed_toggle_then_undo() {
    let mut app = App::in_memory(Document::seed());
    assert_eq!(app.current_context(), "Getting Started");
    assert_eq!(app.filtered_count(), 5);

    dispatch(&mut app, Action::MoveSelection(2));
    assert_eq!(app.selected_id(), Some(3));
    assert!(app.selected_task().unwrap().done);

    dispatch(&mut app, Action::ToggleComplete);
    assert!(!app.selected_task().unwrap().done);
    assert_eq!(app.undo.len(), 1);

    dispatch(&mut app, Action::Undo);
    assert_eq!(app.tasks, Document::seed().tasks);
    assert_eq!(app.selected, 0);
    assert!(app.undo.is_empty());
}

#[test]
fn add_task_to_second_context() {
    let mut app = App::in_memory(doc(&[("Report", "Work"), ("Laundry", "Home")]));
    assert_eq!(app.current_context(), "Home");
    dispatch(&mut app, Action::SwitchContext(1));
    assert_eq!(app.current_context(), "Work");

    submit(&mut app, Action::StartAddTask, "  Buy milk  ");

    assert_eq!(texts(&app), vec!["Report", "Buy milk"]);
    let added = app.selected_task().unwrap();
    assert_eq!(added.text, "Buy milk");
    assert_eq!(added.id, 3);
    assert_eq!(added.context, "Work");
    assert_eq!(added.priority, Priority::None);
    assert_eq!(app.next_id, 4);
    assert_eq!(app.mode, Mode::Normal);
}

#[test]
fn impossible_due_date_is_rejected() {
    let mut app = App::in_memory(doc(&[("Pay rent", "Home")]));

    dispatch(&mut app, Action::StartSetDueDate);
    fill(&mut app, "30");
    dispatch(&mut app, Action::FieldNav(1));
    fill(&mut app, "02");
    dispatch(&mut app, Action::FieldNav(1));
    fill(&mut app, "2024");
    dispatch(&mut app, Action::Commit);

    assert!(matches!(app.error, Some(TaskError::InvalidDateFormat)));
    assert_eq!(app.error.as_ref().unwrap().to_string(), "Invalid date format. Use YYYY-MM-DD");
    assert_eq!(app.selected_task().unwrap().due_date, "");
    assert!(app.undo.is_empty());
    assert_eq!(app.mode, Mode::Normal);

    // The error lasts until the next input
    dispatch(&mut app, Action::MoveSelection(1));
    assert!(app.error.is_none());
}

fn set_due_date(app: &mut App, day: &str, month: &str, year: &str) {
    dispatch(app, Action::StartSetDueDate);
    for (i, value) in [day, month, year].into_iter().enumerate() {
        if i > 0 {
            dispatch(app, Action::FieldNav(1));
        }
        fill(app, value);
    }
    dispatch(app, Action::Commit);
}

#[test]
fn malformed_years_are_rejected() {
    let mut app = App::in_memory(doc(&[("Pay rent", "Home")]));
    for year in ["-1", "24", "0", "20245"] {
        set_due_date(&mut app, "01", "02", year);
        assert!(
            matches!(app.error, Some(TaskError::InvalidDateFormat)),
            "year {year:?} accepted"
        );
        assert_eq!(app.selected_task().unwrap().due_date, "");
    }
    assert!(app.undo.is_empty());

    set_due_date(&mut app, "01", "02", "2024");
    assert!(app.error.is_none());
    assert_eq!(app.selected_task().unwrap().due_date, "2024-02-01");
}

#[test]
fn valid_due_date_is_normalized_then_cleared() {
    let mut app = App::in_memory(doc(&[("Pay rent", "Home")]));

    dispatch(&mut app, Action::StartSetDueDate);
    fill(&mut app, "1");
    dispatch(&mut app, Action::FieldNav(1));
    fill(&mut app, "3");
    dispatch(&mut app, Action::FieldNav(1));
    fill(&mut app, "2025");
    dispatch(&mut app, Action::Commit);
    assert_eq!(app.selected_task().unwrap().due_date, "2025-03-01");

    dispatch(&mut app, Action::ClearDueDate);
    assert_eq!(app.selected_task().unwrap().due_date, "");
    assert_eq!(app.undo.len(), 2);
}

#[test]
fn undo_history_is_bounded() {
    let mut app = App::in_memory(doc(&[("Stretch", "Home")]));
    for _ in 0..51 {
        dispatch(&mut app, Action::ToggleComplete);
    }
    assert_eq!(app.undo.len(), 50);

    for _ in 0..50 {
        dispatch(&mut app, Action::Undo);
        assert!(app.error.is_none());
    }
    // 51 toggles, 50 undone: one toggle survives at the bottom
    assert!(app.tasks[0].done);

    dispatch(&mut app, Action::Undo);
    assert!(matches!(app.error, Some(TaskError::EmptyHistory)));
    assert_eq!(app.error.as_ref().unwrap().to_string(), "Nothing to undo");
}

#[test]
fn delete_context_removes_its_tasks() {
    let mut app = App::in_memory(doc(&[
        ("Report", "Work"),
        ("Laundry", "Home"),
        ("Review", "Work"),
    ]));
    dispatch(&mut app, Action::SwitchContext(1));
    assert_eq!(app.current_context(), "Work");

    // Anything but y leaves the context alone
    submit(&mut app, Action::StartDeleteContext, "n");
    assert_eq!(app.contexts.names, vec!["Home", "Work"]);

    submit(&mut app, Action::StartDeleteContext, "Y");
    assert_eq!(app.contexts.names, vec!["Home"]);
    assert_eq!(app.current_context(), "Home");
    assert!(app.tasks.iter().all(|t| t.context != "Work"));
    assert_eq!(app.tasks.len(), 1);

    dispatch(&mut app, Action::StartDeleteContext);
    assert!(matches!(app.error, Some(TaskError::LastContext)));
    assert_eq!(app.mode, Mode::Normal);
}

#[test]
fn undo_after_context_delete_resurrects_it() {
    let mut app = App::in_memory(doc(&[("Report", "Work"), ("Laundry", "Home")]));
    dispatch(&mut app, Action::SwitchContext(1));
    submit(&mut app, Action::StartDeleteContext, "y");
    assert_eq!(app.contexts.names, vec!["Home"]);

    dispatch(&mut app, Action::Undo);
    assert_eq!(app.contexts.names, vec!["Home", "Work"]);
    assert_eq!(app.tasks.len(), 2);
}

#[test]
fn rename_context_moves_tasks() {
    let mut app = App::in_memory(doc(&[("Report", "Work"), ("Laundry", "Home")]));
    dispatch(&mut app, Action::SwitchContext(1));

    submit(&mut app, Action::StartRenameContext, "Office");
    assert_eq!(app.current_context(), "Office");
    assert!(app.contexts.contains("Office"));
    assert!(!app.contexts.contains("Work"));
    assert_eq!(texts(&app), vec!["Report"]);

    submit(&mut app, Action::StartRenameContext, "Home");
    assert!(matches!(app.error, Some(TaskError::DuplicateContext)));
    assert_eq!(app.current_context(), "Office");

    dispatch(&mut app, Action::Undo);
    assert_eq!(app.tasks[0].context, "Work");
}

#[test]
fn duplicate_context_is_refused() {
    let mut app = App::in_memory(doc(&[("Laundry", "Home")]));
    submit(&mut app, Action::StartAddContext, "Home");
    assert!(matches!(app.error, Some(TaskError::DuplicateContext)));
    assert_eq!(app.contexts.names, vec!["Home"]);

    submit(&mut app, Action::StartAddContext, "Garden");
    assert_eq!(app.current_context(), "Garden");
    assert_eq!(app.filtered_count(), 0);
    assert_eq!(app.selected_id(), None);
}

#[test]
fn selection_stays_in_bounds_across_contexts() {
    let mut app = App::in_memory(doc(&[
        ("a", "Home"),
        ("b", "Home"),
        ("c", "Home"),
        ("d", "Work"),
    ]));
    dispatch(&mut app, Action::MoveSelection(2));
    assert_eq!(app.selected, 2);

    dispatch(&mut app, Action::SwitchContext(1));
    assert_eq!(app.selected, 0);
    assert_eq!(app.selected_task().unwrap().text, "d");

    dispatch(&mut app, Action::DeleteTask);
    assert_eq!(app.filtered_count(), 0);
    dispatch(&mut app, Action::MoveSelection(1));
    dispatch(&mut app, Action::ToggleComplete);
    dispatch(&mut app, Action::TogglePriority);
    assert_eq!(app.selected, 0);
    assert_eq!(app.undo.len(), 1);

    dispatch(&mut app, Action::SwitchContext(-1));
    dispatch(&mut app, Action::MoveSelection(-1));
    assert_eq!(app.selected_task().unwrap().text, "c");
}

#[test]
fn tags_added_and_removed_through_dialogs() {
    let mut app = App::in_memory(doc(&[("Groceries", "Home")]));
    dispatch(&mut app, Action::StartRemoveTag);
    assert!(matches!(app.error, Some(TaskError::NoTags)));

    submit(&mut app, Action::StartAddTag, "shop");
    submit(&mut app, Action::StartAddTag, "urgent");
    submit(&mut app, Action::StartAddTag, "shop");
    assert_eq!(app.selected_task().unwrap().tags, vec!["shop", "urgent"]);
    assert_eq!(app.undo.len(), 2);

    dispatch(&mut app, Action::StartRemoveTag);
    dispatch(&mut app, Action::NavigateChecklist(1));
    dispatch(&mut app, Action::ToggleCheck);
    dispatch(&mut app, Action::Commit);
    assert_eq!(app.selected_task().unwrap().tags, vec!["shop"]);
}

#[test]
fn help_overlay_swallows_actions() {
    let mut app = App::in_memory(doc(&[("Groceries", "Home")]));
    dispatch(&mut app, Action::OpenHelp);
    dispatch(&mut app, Action::DeleteTask);
    dispatch(&mut app, Action::Quit);
    assert_eq!(app.tasks.len(), 1);
    assert!(!app.should_quit);

    dispatch(&mut app, Action::Dismiss);
    assert!(!app.show_help);
    dispatch(&mut app, Action::Quit);
    assert!(app.should_quit);
}

#[test]
fn mutations_persist_to_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("tasks.json");
    let storage = Storage::new(&path);

    let first = storage.load();
    assert_eq!(first, Document::seed());

    let mut app = App::new(first, &Config::default(), Some(storage.clone()));
    submit(&mut app, Action::StartAddContext, "Work");
    submit(&mut app, Action::StartAddTask, "Ship release");
    dispatch(&mut app, Action::TogglePriority);
    dispatch(&mut app, Action::TogglePriority);
    assert!(app.error.is_none());

    let reloaded = storage.try_load().unwrap();
    assert_eq!(reloaded.next_id, 7);
    assert!(reloaded.contexts.contains(&"Work".to_string()));
    let task = reloaded.tasks.iter().find(|t| t.id == 6).unwrap();
    assert_eq!(task.text, "Ship release");
    assert_eq!(task.context, "Work");
    assert_eq!(task.priority, Priority::Medium);

    // A fresh session picks up where the last one stopped
    let mut resumed = App::new(reloaded, &Config::default(), Some(storage));
    assert_eq!(resumed.contexts.names, vec!["Getting Started", "Work"]);
    dispatch(&mut resumed, Action::SwitchContext(1));
    assert_eq!(texts(&resumed), vec!["Ship release"]);
}

#[test]
fn failed_save_keeps_the_change() {
    let dir = TempDir::new().unwrap();
    // A regular file where the document's directory should be
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "not a directory").unwrap();
    let storage = Storage::new(blocker.join("tasks.json"));

    let mut app = App::new(Document::seed(), &Config::default(), Some(storage));
    dispatch(&mut app, Action::ToggleComplete);

    assert!(matches!(app.error, Some(TaskError::Save(_))));
    assert!(app.error.as_ref().unwrap().to_string().starts_with("Could not save: "));
    assert!(app.tasks[0].done);
    assert_eq!(app.undo.len(), 1);

    // The session carries on; the message goes with the next input
    dispatch(&mut app, Action::MoveSelection(1));
    assert!(app.error.is_none());
    assert!(app.tasks[0].done);
}
