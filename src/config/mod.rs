//! Configuration management module
//!
//! Handles loading, saving, and validation of the exercise configuration:
//! limits, timer period, language, character, audio and narration settings.

use crate::exercise::session::Limits;
use crate::models::{ExerciseRecord, GameCharacter};
use crate::{ExploreError, Result, APP_NAME, CONFIG_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub mod persistence;

/// Exercise configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploreConfig {
    /// Seconds the exercise may run before it completes
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u32,
    /// Keystrokes allowed before the exercise completes
    #[serde(default = "default_keystroke_limit")]
    pub keystroke_limit: u32,
    /// Period of the exercise timer in milliseconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Language for texts and narration
    #[serde(default = "default_language")]
    pub language: String,
    /// Character named in the completion text
    #[serde(default)]
    pub character: GameCharacter,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub narration: NarrationConfig,
}

/// Audio playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Play ambient music and row cues
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directory holding the audio assets
    #[serde(default = "default_asset_base")]
    pub asset_base: PathBuf,
    /// Volume of the ambient track
    #[serde(default = "default_ambient_volume")]
    pub ambient_volume: f32,
}

/// Speech synthesis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationConfig {
    /// Read header and intro texts aloud
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Speech program writing audio to stdout
    #[serde(default = "default_program")]
    pub program: String,
    /// Arguments before the text; `{language}` is substituted
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Synthesis attempts per text
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_time_limit() -> u32 {
    60
}

fn default_keystroke_limit() -> u32 {
    50
}

fn default_tick_interval() -> u64 {
    1000
}

fn default_language() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

fn default_asset_base() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_NAME).join("audio"))
        .unwrap_or_else(|| PathBuf::from("audio"))
}

fn default_ambient_volume() -> f32 {
    0.1
}

fn default_program() -> String {
    "espeak-ng".to_string()
}

fn default_args() -> Vec<String> {
    vec![
        "--stdout".to_string(),
        "-v".to_string(),
        "{language}".to_string(),
    ]
}

fn default_max_attempts() -> usize {
    2
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: default_time_limit(),
            keystroke_limit: default_keystroke_limit(),
            tick_interval_ms: default_tick_interval(),
            language: default_language(),
            character: GameCharacter::default(),
            audio: AudioConfig::default(),
            narration: NarrationConfig::default(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            asset_base: default_asset_base(),
            ambient_volume: default_ambient_volume(),
        }
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: default_program(),
            args: default_args(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl ExploreConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        const MAX_TIME_LIMIT: u32 = 3600; // 1 hour
        if self.time_limit_secs == 0 || self.time_limit_secs > MAX_TIME_LIMIT {
            return Err(ExploreError::ConfigError(format!(
                "Time limit must be between 1 and {} seconds",
                MAX_TIME_LIMIT
            )));
        }

        const MAX_KEYSTROKES: u32 = 10_000;
        if self.keystroke_limit == 0 || self.keystroke_limit > MAX_KEYSTROKES {
            return Err(ExploreError::ConfigError(format!(
                "Keystroke limit must be between 1 and {}",
                MAX_KEYSTROKES
            )));
        }

        const MIN_TICK_MS: u64 = 10;
        const MAX_TICK_MS: u64 = 10_000;
        if self.tick_interval_ms < MIN_TICK_MS || self.tick_interval_ms > MAX_TICK_MS {
            return Err(ExploreError::ConfigError(format!(
                "Tick interval must be between {} and {} ms",
                MIN_TICK_MS, MAX_TICK_MS
            )));
        }

        if self.language.trim().is_empty() {
            return Err(ExploreError::ConfigError(
                "Language must not be empty".to_string(),
            ));
        }

        if self.character.name.trim().is_empty() {
            return Err(ExploreError::ConfigError(
                "Character name must not be empty".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.audio.ambient_volume) {
            return Err(ExploreError::ConfigError(
                "Ambient volume must be between 0.0 and 1.0".to_string(),
            ));
        }

        if self.narration.enabled {
            if self.narration.program.trim().is_empty() {
                return Err(ExploreError::ConfigError(
                    "Narration program must not be empty".to_string(),
                ));
            }
            if self.narration.max_attempts == 0 {
                return Err(ExploreError::ConfigError(
                    "Narration needs at least one attempt".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Completion limits for a session
    pub fn limits(&self) -> Limits {
        Limits::new(self.time_limit_secs, self.keystroke_limit)
    }

    /// Period of the exercise timer
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Set the time limit
    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = secs;
        self
    }

    /// Set the keystroke limit
    pub fn with_keystroke_limit(mut self, limit: u32) -> Self {
        self.keystroke_limit = limit;
        self
    }

    /// Set the timer period
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Set the language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the active character
    pub fn with_character(mut self, character: GameCharacter) -> Self {
        self.character = character;
        self
    }

    /// Set the audio asset directory
    pub fn with_asset_base(mut self, path: PathBuf) -> Self {
        self.audio.asset_base = path;
        self
    }

    /// Turn audio playback on or off
    pub fn with_audio(mut self, enabled: bool) -> Self {
        self.audio.enabled = enabled;
        self
    }

    /// Turn narration on or off
    pub fn with_narration(mut self, enabled: bool) -> Self {
        self.narration.enabled = enabled;
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: &PathBuf) -> Result<Self> {
        if !config_path.exists() {
            tracing::info!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ExploreError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ExploreError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;
        tracing::info!("Loaded config from {}", config_path.display());

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, config_path: &PathBuf) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ExploreError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| {
            ExploreError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/explore-keys/explore-keys.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ExploreError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

/// Configuration manager for handling config and records persistence
pub struct ConfigManager {
    records: persistence::RecordsStorage,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Result<Self> {
        Ok(Self::with_records(persistence::RecordsStorage::new()?))
    }

    /// Create a manager around a specific records storage
    pub fn with_records(records: persistence::RecordsStorage) -> Self {
        Self { records }
    }

    /// Save an exercise record
    pub fn save_record(&self, record: ExerciseRecord) -> Result<()> {
        self.records.append_record(record)
    }

    /// Get the most recent records, newest first
    pub fn get_recent_records(&self, limit: usize) -> Result<Vec<ExerciseRecord>> {
        // Stored oldest first
        let mut records = self.records.get_recent_records(limit)?;
        records.reverse();
        Ok(records)
    }
}
