/// Context name used when the registry would otherwise be empty
pub const DEFAULT_CONTEXT: &str = "Work";

/// The set of known context names plus the currently selected one.
///
/// `names` is kept sorted and deduplicated by reconciliation; between
/// reconciliations newly added names are appended so the user sees them in
/// the order they were created until the next load or undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRegistry {
    pub names: Vec<String>,
    pub current: String,
}

impl ContextRegistry {
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Position of the current context in registry order
    pub fn current_index(&self) -> Option<usize> {
        self.names.iter().position(|n| n == &self.current)
    }
}
