use crate::ops::task_ops;
use crate::tui::action::Action;
use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_tag_removal(app: &mut App, action: Action) {
    match action {
        Action::Cancel => app.mode = Mode::Normal,
        Action::NavigateChecklist(delta) => {
            if let Mode::TagRemoval { index, checks } = &mut app.mode {
                let last = checks.len().saturating_sub(1);
                *index = index.saturating_add_signed(delta).min(last);
            }
        }
        Action::ToggleCheck => {
            if let Mode::TagRemoval { index, checks } = &mut app.mode
                && let Some(flag) = checks.get_mut(*index)
            {
                *flag = !*flag;
            }
        }
        Action::Commit => {
            let Mode::TagRemoval { checks, .. } = std::mem::replace(&mut app.mode, Mode::Normal)
            else {
                return;
            };
            if checks.iter().any(|&c| c) {
                mutate_selected(app, "removed tags", |t| {
                    task_ops::remove_checked_tags(t, &checks);
                });
            }
        }
        _ => {}
    }
}
