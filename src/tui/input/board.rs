use crate::tui::action::{Action, Axis};
use crate::tui::app::{App, Mode};

pub(super) fn handle_kanban(app: &mut App, action: Action) {
    match action {
        Action::Scroll(Axis::Horizontal, delta) => {
            let max = app.kanban_max_scroll_x();
            app.kanban_scroll_x = app.kanban_scroll_x.saturating_add_signed(delta).min(max);
        }
        Action::Scroll(Axis::Vertical, delta) => {
            let max = app.kanban_max_scroll_y();
            app.kanban_scroll_y = app.kanban_scroll_y.saturating_add_signed(delta).min(max);
        }
        Action::Exit | Action::Quit => {
            app.kanban_scroll_x = 0;
            app.kanban_scroll_y = 0;
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}

pub(super) fn handle_statistics(app: &mut App, action: Action) {
    if matches!(action, Action::Exit | Action::Quit) {
        app.mode = Mode::Normal;
    }
}
