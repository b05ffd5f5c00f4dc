use serde::{Deserialize, Serialize};

use super::task::{Task, TaskId};

/// Context every seed task belongs to
pub const SEED_CONTEXT: &str = "Getting Started";

/// The persisted document: every task, the identity counter, and the known
/// context names. Always written and read as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub next_id: TaskId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contexts: Vec<String>,
}

impl Document {
    /// The onboarding document used when nothing usable is stored.
    pub fn seed() -> Self {
        let lines = [
            ("Welcome to your todo app!", false),
            ("Press 'a' to add a new task", false),
            ("Press space to toggle completion", true),
            ("Use arrow keys to navigate", false),
            ("Press '?' to see more keybindings", false),
        ];
        let tasks = lines
            .iter()
            .zip(1..)
            .map(|((text, done), id)| {
                let mut task = Task::new(id, *text, SEED_CONTEXT);
                task.done = *done;
                task
            })
            .collect();
        Document {
            tasks,
            next_id: 6,
            contexts: vec![SEED_CONTEXT.to_string()],
        }
    }

    /// Repair a zero counter to one past the highest stored identity.
    pub fn normalize_next_id(&mut self) {
        if self.next_id == 0 {
            self.next_id = self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seed_has_five_tasks_in_one_context() {
        let doc = Document::seed();
        assert_eq!(doc.tasks.len(), 5);
        assert!(doc.tasks.iter().all(|t| t.context == SEED_CONTEXT));
        assert_eq!(doc.contexts, vec![SEED_CONTEXT]);
        assert_eq!(doc.next_id, 6);
        assert!(doc.tasks[2].done);
        assert_eq!(
            doc.tasks.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn zero_counter_is_derived_from_max_id() {
        let mut doc: Document = serde_json::from_str(
            r#"{"tasks":[{"id":4,"task":"a","checked":false,"context":"W"},
                        {"id":9,"task":"b","checked":false,"context":"W"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.next_id, 0);
        doc.normalize_next_id();
        assert_eq!(doc.next_id, 10);
    }

    #[test]
    fn stored_counter_is_kept() {
        let mut doc = Document::seed();
        doc.next_id = 42;
        doc.normalize_next_id();
        assert_eq!(doc.next_id, 42);
    }

    #[test]
    fn empty_document_counter_starts_at_one() {
        let mut doc = Document::default();
        doc.normalize_next_id();
        assert_eq!(doc.next_id, 1);
    }
}
