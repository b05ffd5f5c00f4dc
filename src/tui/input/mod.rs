mod board;
mod common;
mod date_input;
mod normal;
mod tag_removal;
mod text_input;

use crossterm::event::{KeyCode, KeyEvent};

use super::action::Action;
use super::app::{App, Mode};

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use board::*;
#[allow(unused_imports)]
use common::*;
#[allow(unused_imports)]
use date_input::*;
#[allow(unused_imports)]
use normal::*;
#[allow(unused_imports)]
use tag_removal::*;
#[allow(unused_imports)]
use text_input::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    match app.keymap.action_for_key(app.key_context(), key) {
        Some(action) => dispatch(app, action),
        None => {
            if !app.show_help {
                app.error = None;
            }
        }
    }
}

/// Run one action through the state machine. The help overlay swallows
/// everything but Dismiss; otherwise the previous error is cleared and the
/// action goes to the current mode's handler.
pub fn dispatch(app: &mut App, action: Action) {
    if app.show_help {
        if action == Action::Dismiss {
            app.show_help = false;
        }
        return;
    }
    app.error = None;

    match &app.mode {
        Mode::Normal => handle_normal(app, action),
        Mode::TextInput { .. } => handle_text_input(app, action),
        Mode::DateInput { .. } => handle_date_input(app, action),
        Mode::TagRemoval { .. } => handle_tag_removal(app, action),
        Mode::Kanban => handle_kanban(app, action),
        Mode::Statistics => handle_statistics(app, action),
    }
}
