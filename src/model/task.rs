use serde::{Deserialize, Serialize};

/// Stable task identity. Assigned from the document's `next_id` counter and
/// never reused within a session.
pub type TaskId = u64;

/// Task priority. Stored as `""`, `"low"`, `"medium"` or `"high"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    #[serde(rename = "")]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    /// All priorities in cycle order
    pub const ALL: [Priority; 4] = [
        Priority::None,
        Priority::Low,
        Priority::Medium,
        Priority::High,
    ];

    /// Next priority in the cycle none → low → medium → high → none
    pub fn cycle(self) -> Priority {
        match self {
            Priority::None => Priority::Low,
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::None,
        }
    }

    /// Marker shown before the task text (`!`, `!!`, `!!!`)
    pub fn marker(self) -> &'static str {
        match self {
            Priority::None => "",
            Priority::Low => "!",
            Priority::Medium => "!!",
            Priority::High => "!!!",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::None => "none",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A single task record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Display text
    #[serde(rename = "task")]
    pub text: String,
    /// Completion flag
    #[serde(rename = "checked")]
    pub done: bool,
    /// Owning context name
    pub context: String,
    #[serde(default)]
    pub priority: Priority,
    /// Empty, or a `YYYY-MM-DD` date
    #[serde(default)]
    pub due_date: String,
    /// Tags in insertion order, no duplicates
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>, context: impl Into<String>) -> Self {
        Task {
            id,
            text: text.into(),
            done: false,
            context: context.into(),
            priority: Priority::None,
            due_date: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn has_due_date(&self) -> bool {
        !self.due_date.is_empty()
    }

    /// Append a tag unless the task already carries it. Returns true if added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }
}

/// Older documents wrote `"tags": null` for untagged tasks.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let tags: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(tags.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn priority_cycles_through_all_levels() {
        let mut p = Priority::None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            p = p.cycle();
            seen.push(p);
        }
        assert_eq!(
            seen,
            vec![
                Priority::Low,
                Priority::Medium,
                Priority::High,
                Priority::None
            ]
        );
    }

    #[test]
    fn priority_serializes_as_lowercase_or_empty() {
        assert_eq!(serde_json::to_string(&Priority::None).unwrap(), "\"\"");
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let p: Priority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(p, Priority::Medium);
    }

    #[test]
    fn task_record_uses_document_field_names() {
        let mut task = Task::new(3, "Write docs", "Work");
        task.tags.push("writing".into());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["task"], "Write docs");
        assert_eq!(json["checked"], false);
        assert_eq!(json["priority"], "");
        assert_eq!(json["due_date"], "");
        assert_eq!(json["tags"][0], "writing");
    }

    #[test]
    fn missing_optional_fields_default() {
        let task: Task = serde_json::from_str(
            r#"{"id":1,"task":"x","checked":true,"context":"Home","tags":null}"#,
        )
        .unwrap();
        assert_eq!(task.priority, Priority::None);
        assert!(task.due_date.is_empty());
        assert!(task.tags.is_empty());
        assert!(task.done);
    }

    #[test]
    fn add_tag_rejects_duplicates() {
        let mut task = Task::new(1, "x", "Home");
        assert!(task.add_tag("a"));
        assert!(!task.add_tag("a"));
        assert!(task.add_tag("b"));
        assert_eq!(task.tags, vec!["a", "b"]);
    }
}
