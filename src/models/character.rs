//! Active game character

use serde::{Deserialize, Serialize};

/// Character the learner plays as; its name appears in the completion text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCharacter {
    /// Display name
    pub name: String,
    /// Picture shown next to the call-to-action, path or URL
    #[serde(default)]
    pub image: String,
}

impl Default for GameCharacter {
    fn default() -> Self {
        Self {
            name: "Ninja".to_string(),
            image: String::new(),
        }
    }
}

impl GameCharacter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: String::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}
