//! String catalog
//!
//! Resolves the fixed display/narration string identifiers. Built-in English
//! texts are always available; a TOML file can override them per language.

use crate::{ExploreError, Result, APP_NAME, STRINGS_FILE};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const INTRO_HEADER: &str = "explore.introHeader";
pub const INTRO_TEXT: &str = "explore.introText";
pub const COMPLETED_HEADER: &str = "explore.completedHeader";
pub const WELL_DONE: &str = "explore.wellDone";
pub const READY_TEXT: &str = "explore.readyText";
pub const NEXT: &str = "explore.next";

const BUILT_IN_EN: [(&str, &str); 6] = [
    (INTRO_HEADER, "Explore the keyboard"),
    (
        INTRO_TEXT,
        "Press any keys you like. Every keyboard row makes its own sound.",
    ),
    (COMPLETED_HEADER, "Exploration complete"),
    (WELL_DONE, "Well done!"),
    (READY_TEXT, "is ready for the next task."),
    (NEXT, "Next"),
];

/// Strings file layout: one table per language
///
/// ```toml
/// [en]
/// "explore.introHeader" = "Explore the keyboard"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
struct StringsFile {
    languages: HashMap<String, HashMap<String, String>>,
}

/// Resolved strings for one language
#[derive(Debug, Clone)]
pub struct Catalog {
    language: String,
    strings: HashMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::built_in("en")
    }
}

impl Catalog {
    /// Catalog holding only the built-in English texts
    pub fn built_in(language: &str) -> Self {
        let strings = BUILT_IN_EN
            .iter()
            .map(|(key, text)| (key.to_string(), text.to_string()))
            .collect();
        Self {
            language: language.to_string(),
            strings,
        }
    }

    /// Built-in texts overridden by the `[language]` table of a TOML document
    pub fn from_toml_str(language: &str, content: &str) -> Result<Self> {
        let file: StringsFile = toml::from_str(content)
            .map_err(|e| ExploreError::LocalizationError(format!("invalid strings file: {}", e)))?;

        let mut catalog = Self::built_in(language);
        if let Some(overrides) = file.languages.get(language) {
            catalog.strings.extend(overrides.clone());
        } else {
            tracing::debug!("No strings for language {}, using built-in texts", language);
        }
        Ok(catalog)
    }

    /// Load overrides from a strings file; a missing file yields the built-ins
    pub fn load_from(path: &Path, language: &str) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::built_in(language));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ExploreError::LocalizationError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(language, &content)
    }

    /// Load from the standard strings file location
    pub fn load(language: &str) -> Result<Self> {
        Self::load_from(&Self::strings_file_path()?, language)
    }

    /// Uses $CONFIG_HOME/explore-keys/strings.toml
    pub fn strings_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ExploreError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(STRINGS_FILE))
    }

    /// Language whose texts this catalog resolves
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Resolve a string identifier; unknown identifiers resolve to themselves
    pub fn t(&self, key: &str) -> String {
        match self.strings.get(key) {
            Some(text) => text.clone(),
            None => {
                tracing::debug!("Missing string for {}", key);
                key.to_string()
            }
        }
    }
}
