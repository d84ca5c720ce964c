//! Exercise progress tracker
//!
//! Source of truth for the keystroke count and the completed flag. The
//! session receives it explicitly on every operation instead of reading
//! shared global state.

/// Keystroke and completion progress for one exercise
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressTracker {
    type_count: u32,
    completed: bool,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one key-down
    pub fn increase_type(&mut self) {
        self.type_count = self.type_count.saturating_add(1);
    }

    /// Record that the exercise has been completed
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    /// Number of key-downs recorded so far
    pub fn type_count(&self) -> u32 {
        self.type_count
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
