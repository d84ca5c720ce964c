//! Data models module
//!
//! Contains the exercise progress tracker, the game character and the
//! exercise record saved after a completed session.

pub mod character;
pub mod progress;
pub mod record;

// Re-export commonly used types
pub use character::GameCharacter;
pub use progress::ProgressTracker;
pub use record::{CompletionReason, ExerciseRecord};
