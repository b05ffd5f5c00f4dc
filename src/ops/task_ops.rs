use crate::model::task::{Task, TaskId};

/// Tasks belonging to `context`, in backing order.
pub fn filtered_view<'a>(tasks: &'a [Task], context: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.context == context).collect()
}

/// Number of tasks in `context`
pub fn filtered_count(tasks: &[Task], context: &str) -> usize {
    tasks.iter().filter(|t| t.context == context).count()
}

/// Identity of the task at `position` within the filtered view of `context`.
pub fn id_at(tasks: &[Task], context: &str, position: usize) -> Option<TaskId> {
    tasks
        .iter()
        .filter(|t| t.context == context)
        .nth(position)
        .map(|t| t.id)
}

/// Position of a task within its context's filtered view.
pub fn filtered_position(tasks: &[Task], context: &str, id: TaskId) -> Option<usize> {
    tasks
        .iter()
        .filter(|t| t.context == context)
        .position(|t| t.id == id)
}

/// Backing index of the task with identity `id`.
pub fn find_index(tasks: &[Task], id: TaskId) -> Option<usize> {
    tasks.iter().position(|t| t.id == id)
}

pub fn find_task(tasks: &[Task], id: TaskId) -> Option<&Task> {
    tasks.iter().find(|t| t.id == id)
}

/// Append a new task and bump the identity counter. Returns the new identity.
pub fn append(
    tasks: &mut Vec<Task>,
    next_id: &mut TaskId,
    text: &str,
    context: &str,
) -> TaskId {
    let id = *next_id;
    tasks.push(Task::new(id, text, context));
    *next_id += 1;
    id
}

/// Apply `f` to the task with identity `id`. Returns false (and does
/// nothing) if no such task exists.
pub fn mutate<F>(tasks: &mut [Task], id: TaskId, f: F) -> bool
where
    F: FnOnce(&mut Task),
{
    match tasks.iter_mut().find(|t| t.id == id) {
        Some(task) => {
            f(task);
            true
        }
        None => false,
    }
}

/// Remove the task with identity `id`, returning it.
pub fn remove(tasks: &mut Vec<Task>, id: TaskId) -> Option<Task> {
    let idx = find_index(tasks, id)?;
    Some(tasks.remove(idx))
}

/// Swap two tasks in the backing collection by identity. Filtered
/// neighbours are not necessarily backing neighbours, so both identities are
/// resolved first.
pub fn swap(tasks: &mut [Task], a: TaskId, b: TaskId) -> bool {
    match (find_index(tasks, a), find_index(tasks, b)) {
        (Some(ia), Some(ib)) => {
            tasks.swap(ia, ib);
            true
        }
        _ => false,
    }
}

/// Move the task at filtered `position` of `context` one step up (`delta`
/// < 0) or down (`delta` > 0) within that context. Returns the new filtered
/// position, or None at a boundary.
pub fn shift_within_context(
    tasks: &mut [Task],
    context: &str,
    position: usize,
    delta: isize,
) -> Option<usize> {
    let target = position.checked_add_signed(delta)?;
    let moving = id_at(tasks, context, position)?;
    let other = id_at(tasks, context, target)?;
    swap(tasks, moving, other).then_some(target)
}

/// Remove every tag whose flag in `checks` is set. Returns the number removed.
pub fn remove_checked_tags(task: &mut Task, checks: &[bool]) -> usize {
    let before = task.tags.len();
    let mut flags = checks.iter();
    task.tags
        .retain(|_| !flags.next().copied().unwrap_or(false));
    before - task.tags.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Interleaved contexts so that filtered neighbours are not backing neighbours
    fn interleaved() -> Vec<Task> {
        vec![
            Task::new(1, "w1", "Work"),
            Task::new(2, "h1", "Home"),
            Task::new(3, "w2", "Work"),
            Task::new(4, "h2", "Home"),
            Task::new(5, "w3", "Work"),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<TaskId> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn filtered_view_keeps_backing_order() {
        let tasks = interleaved();
        let work: Vec<TaskId> = filtered_view(&tasks, "Work").iter().map(|t| t.id).collect();
        assert_eq!(work, vec![1, 3, 5]);
        assert_eq!(filtered_count(&tasks, "Home"), 2);
        assert!(filtered_view(&tasks, "Nowhere").is_empty());
    }

    #[test]
    fn position_and_identity_round_trip() {
        let tasks = interleaved();
        assert_eq!(id_at(&tasks, "Home", 1), Some(4));
        assert_eq!(filtered_position(&tasks, "Home", 4), Some(1));
        assert_eq!(id_at(&tasks, "Home", 2), None);
        assert_eq!(find_index(&tasks, 4), Some(3));
        assert_eq!(find_index(&tasks, 99), None);
    }

    #[test]
    fn append_assigns_counter_and_increments() {
        let mut tasks = interleaved();
        let mut next = 6;
        let id = append(&mut tasks, &mut next, "Buy milk", "Work");
        assert_eq!(id, 6);
        assert_eq!(next, 7);
        assert_eq!(tasks.last().map(|t| t.text.as_str()), Some("Buy milk"));
    }

    #[test]
    fn mutate_and_remove_missing_id_are_noops() {
        let mut tasks = interleaved();
        let before = tasks.clone();
        assert!(!mutate(&mut tasks, 42, |t| t.done = true));
        assert!(remove(&mut tasks, 42).is_none());
        assert_eq!(tasks, before);
    }

    #[test]
    fn mutate_targets_identity() {
        let mut tasks = interleaved();
        assert!(mutate(&mut tasks, 3, |t| t.done = true));
        assert!(tasks[2].done);
        assert!(!tasks[0].done);
    }

    #[test]
    fn shift_swaps_filtered_neighbours_across_gaps() {
        let mut tasks = interleaved();
        // Work: [1, 3, 5]; move position 0 down
        assert_eq!(shift_within_context(&mut tasks, "Work", 0, 1), Some(1));
        assert_eq!(ids(&tasks), vec![3, 2, 1, 4, 5]);
        // Home tasks untouched in place
        assert_eq!(tasks[1].id, 2);
        assert_eq!(tasks[3].id, 4);
        assert!(tasks.iter().all(|t| (t.id % 2 == 1) == (t.context == "Work")));
    }

    #[test]
    fn shift_stops_at_boundaries() {
        let mut tasks = interleaved();
        assert_eq!(shift_within_context(&mut tasks, "Work", 0, -1), None);
        assert_eq!(shift_within_context(&mut tasks, "Work", 2, 1), None);
        assert_eq!(ids(&tasks), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn remove_checked_tags_keeps_unchecked_order() {
        let mut task = Task::new(1, "x", "Work");
        task.tags = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let removed = remove_checked_tags(&mut task, &[false, true, false, true]);
        assert_eq!(removed, 2);
        assert_eq!(task.tags, vec!["a", "c"]);
    }

    #[test]
    fn remove_checked_tags_with_short_checklist() {
        let mut task = Task::new(1, "x", "Work");
        task.tags = vec!["a".into(), "b".into()];
        assert_eq!(remove_checked_tags(&mut task, &[true]), 1);
        assert_eq!(task.tags, vec!["b"]);
    }
}
