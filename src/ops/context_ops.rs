use std::collections::BTreeSet;

use crate::model::context::{ContextRegistry, DEFAULT_CONTEXT};
use crate::model::task::Task;

use super::TaskError;

/// Rebuild the registry as the sorted union of its known names and every
/// context referenced by a task. Keeps the current selection if it survived,
/// otherwise selects the first name, creating the default context when
/// nothing is left.
pub fn reconcile(registry: &mut ContextRegistry, tasks: &[Task]) {
    let names: BTreeSet<String> = registry
        .names
        .iter()
        .cloned()
        .chain(tasks.iter().map(|t| t.context.clone()))
        .collect();
    registry.names = names.into_iter().collect();

    if registry.current.is_empty() || !registry.contains(&registry.current) {
        match registry.names.first() {
            Some(first) => registry.current = first.clone(),
            None => {
                registry.names = vec![DEFAULT_CONTEXT.to_string()];
                registry.current = DEFAULT_CONTEXT.to_string();
            }
        }
    }
}

/// Register a new context and select it.
pub fn add_context(registry: &mut ContextRegistry, name: &str) -> Result<(), TaskError> {
    if registry.contains(name) {
        return Err(TaskError::DuplicateContext);
    }
    registry.names.push(name.to_string());
    registry.current = name.to_string();
    Ok(())
}

/// Rename `old` to `new`, moving every task of `old` along with it. Renaming
/// a context to itself is a no-op. Returns true if anything changed.
pub fn rename_context(
    registry: &mut ContextRegistry,
    tasks: &mut [Task],
    old: &str,
    new: &str,
) -> Result<bool, TaskError> {
    if old == new {
        return Ok(false);
    }
    if registry.contains(new) {
        return Err(TaskError::DuplicateContext);
    }
    if let Some(entry) = registry.names.iter_mut().find(|n| n.as_str() == old) {
        *entry = new.to_string();
    }
    for task in tasks.iter_mut().filter(|t| t.context == old) {
        task.context = new.to_string();
    }
    if registry.current == old {
        registry.current = new.to_string();
    }
    Ok(true)
}

/// Delete a context together with all of its tasks, then select the first
/// remaining context. Returns the number of tasks removed.
pub fn delete_context(
    registry: &mut ContextRegistry,
    tasks: &mut Vec<Task>,
    name: &str,
) -> Result<usize, TaskError> {
    if registry.names.len() <= 1 {
        return Err(TaskError::LastContext);
    }
    let before = tasks.len();
    tasks.retain(|t| t.context != name);
    registry.names.retain(|n| n != name);
    if let Some(first) = registry.names.first() {
        registry.current = first.clone();
    }
    Ok(before - tasks.len())
}

/// Step the current context by `delta` in registry order, wrapping.
/// Returns true if the selection changed.
pub fn cycle_context(registry: &mut ContextRegistry, delta: isize) -> bool {
    let len = registry.names.len();
    if len == 0 {
        return false;
    }
    let current = registry.current_index().unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(len as isize) as usize;
    let changed = registry.names[next] != registry.current;
    registry.current = registry.names[next].clone();
    changed
}
