/// Scroll axis in the kanban board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Editing a dialog's text buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

/// An abstract input event. Physical keys are translated into actions by the
/// keymap; the state machine only ever sees actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Normal
    MoveSelection(isize),
    SwitchContext(isize),
    ToggleComplete,
    StartAddTask,
    StartEditTask,
    DeleteTask,
    StartAddContext,
    StartRenameContext,
    StartDeleteContext,
    StartAddTag,
    StartRemoveTag,
    TogglePriority,
    StartSetDueDate,
    ClearDueDate,
    Undo,
    ToggleMoveMode,
    OpenKanban,
    OpenStats,
    OpenHelp,
    Quit,
    // Dialogs
    Cancel,
    Commit,
    Edit(TextEdit),
    FieldNav(isize),
    NavigateChecklist(isize),
    ToggleCheck,
    // Boards
    Scroll(Axis, isize),
    Exit,
    // Help overlay
    Dismiss,
}
