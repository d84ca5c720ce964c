//! explore-keys - keyboard exploration exercise
//!
//! A terminal exercise that narrates its instructions, plays a sound for the
//! keyboard row of every key pressed, and finishes once the time or keystroke
//! limit is crossed.

use thiserror::Error;

pub mod app;
pub mod audio;
pub mod config;
pub mod exercise;
pub mod i18n;
pub mod logging;
pub mod models;
pub mod narration;
pub mod util;

// Common error types
#[derive(Debug, Error)]
pub enum ExploreError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Configuration validation or parsing error
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Audio device or track error
    #[error("Audio error: {0}")]
    AudioError(String),
    /// Speech synthesis error
    #[error("Speech synthesis error: {0}")]
    SpeechError(String),
    /// TUI rendering or interaction error
    #[error("TUI error: {0}")]
    TuiError(String),
    /// Exercise records persistence error
    #[error("Records persistence error: {0}")]
    PersistenceError(String),
    /// String catalog loading error
    #[error("Localization error: {0}")]
    LocalizationError(String),
}

impl From<serde_json::Error> for ExploreError {
    fn from(err: serde_json::Error) -> Self {
        ExploreError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for ExploreError {
    fn from(err: toml::de::Error) -> Self {
        ExploreError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for ExploreError {
    fn from(err: toml::ser::Error) -> Self {
        ExploreError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for explore-keys operations
pub type Result<T> = std::result::Result<T, ExploreError>;

/// Error handling utilities
pub mod error {
    use super::{ExploreError, Result};
    use std::time::Duration;
    use tokio::time::sleep;

    /// Retry configuration for transient operations
    #[derive(Debug, Clone)]
    pub struct RetryConfig {
        /// Maximum number of retry attempts
        pub max_attempts: usize,
        /// Initial delay between retries
        pub initial_delay: Duration,
        /// Multiplier for exponential backoff
        pub backoff_multiplier: f64,
        /// Maximum delay between retries
        pub max_delay: Duration,
    }

    impl Default for RetryConfig {
        fn default() -> Self {
            Self {
                max_attempts: 3,
                initial_delay: Duration::from_millis(100),
                backoff_multiplier: 2.0,
                max_delay: Duration::from_secs(2),
            }
        }
    }

    impl RetryConfig {
        /// Retry configuration with a custom attempt count
        pub fn with_max_attempts(mut self, attempts: usize) -> Self {
            self.max_attempts = attempts.max(1);
            self
        }
    }

    /// Retry a fallible async operation with exponential backoff
    pub async fn retry_async<F, Fut, T>(operation: F, config: RetryConfig) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut delay = config.initial_delay;
        let mut last_error = None;

        for attempt in 0..config.max_attempts {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    let retryable = is_retryable_error(&err);
                    last_error = Some(err);
                    if !retryable {
                        break;
                    }

                    // Don't sleep after the last attempt
                    if attempt < config.max_attempts - 1 {
                        sleep(delay).await;
                        delay = std::cmp::min(
                            Duration::from_millis(
                                (delay.as_millis() as f64 * config.backoff_multiplier) as u64,
                            ),
                            config.max_delay,
                        );
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ExploreError::SpeechError("Retry failed with no error".to_string())
        }))
    }

    /// Check if an error is retryable
    pub fn is_retryable_error(error: &ExploreError) -> bool {
        match error {
            ExploreError::IoError(io_err) => matches!(
                io_err.kind(),
                std::io::ErrorKind::Interrupted
                    | std::io::ErrorKind::WouldBlock
                    | std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::ConnectionReset
            ),
            ExploreError::SpeechError(_) => true,

            ExploreError::ConfigError(_) => false,
            ExploreError::LocalizationError(_) => false,
            ExploreError::AudioError(_) => false,
            ExploreError::TuiError(_) => false,
            ExploreError::PersistenceError(_) => false,
        }
    }

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &ExploreError) -> String {
        match error {
            ExploreError::AudioError(_) => {
                "Sound could not be played. The exercise still works without it.".to_string()
            }
            ExploreError::SpeechError(_) => {
                "Narration is unavailable. Check that the speech program is installed.".to_string()
            }
            ExploreError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            ExploreError::PersistenceError(_) => {
                "Failed to save the exercise record. Check disk space and permissions.".to_string()
            }
            ExploreError::LocalizationError(msg) => {
                format!("Could not load translations: {}. Using built-in texts.", msg)
            }
            _ => error.to_string(),
        }
    }

    /// Describe how the app carries on after a non-fatal error
    pub fn create_fallback_strategy(error: &ExploreError) -> Option<String> {
        match error {
            ExploreError::AudioError(_) => {
                Some("Falling back to silent audio output.".to_string())
            }
            ExploreError::SpeechError(_) => {
                Some("Continuing without narration; texts stay on screen.".to_string())
            }
            ExploreError::LocalizationError(_) => {
                Some("Falling back to the built-in English texts.".to_string())
            }
            _ => None,
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "explore-keys";
pub const CONFIG_FILE: &str = "explore-keys.toml";
pub const STRINGS_FILE: &str = "strings.toml";
pub const RECORDS_FILE: &str = "records.json";
pub const LOG_FILE: &str = "explore-keys.log";
pub const MAX_RECORDS_HISTORY: usize = 100;
