//! Exercise record
//!
//! Summary of one completed exercise, shown on the task screen and
//! optionally saved to the records history.

use crate::util::units::format_clock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which limit ended the exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionReason {
    /// Elapsed time went past the time limit
    TimeLimit,
    /// Keystroke count went past the keystroke limit
    KeystrokeLimit,
}

impl fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionReason::TimeLimit => write!(f, "time limit"),
            CompletionReason::KeystrokeLimit => write!(f, "keystroke limit"),
        }
    }
}

/// Result of one completed exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// When the exercise was completed
    pub timestamp: DateTime<Utc>,
    /// Active seconds counted by the timer
    pub elapsed_seconds: u32,
    /// Key-downs counted by the tracker
    pub keystrokes: u32,
    /// Name of the character that played
    pub character: String,
    /// Limit that ended the exercise
    pub reason: CompletionReason,
}

impl ExerciseRecord {
    /// Create a record stamped with the current time
    pub fn new(
        elapsed_seconds: u32,
        keystrokes: u32,
        character: impl Into<String>,
        reason: CompletionReason,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            elapsed_seconds,
            keystrokes,
            character: character.into(),
            reason,
        }
    }

    /// Keystrokes per minute over the active time
    pub fn keys_per_minute(&self) -> f64 {
        if self.elapsed_seconds == 0 {
            return 0.0;
        }
        self.keystrokes as f64 * 60.0 / self.elapsed_seconds as f64
    }

    /// One-line summary for history lists
    pub fn summary(&self) -> String {
        format!(
            "{} - {} - {} keys in {} - ended by {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.character,
            self.keystrokes,
            format_clock(self.elapsed_seconds),
            self.reason
        )
    }
}
