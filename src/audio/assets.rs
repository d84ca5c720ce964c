//! Audio asset addressing

use crate::exercise::keys::KeyRow;
use std::path::{Path, PathBuf};

pub const AMBIENT_FILE: &str = "482783__mattiagiovanetti__ninja-tune.mp3";
pub const TOP_CUE_FILE: &str = "131142__flameeagle__block.mp3";
pub const MIDDLE_CUE_FILE: &str = "471147__worldmaxter__sword-slide.mp3";
pub const BOTTOM_CUE_FILE: &str = "411462__thebuilder15__bubble-pop.mp3";

/// Resolves fixed asset file names against a base location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLocator {
    base: PathBuf,
}

impl AssetLocator {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.base.join(file_name)
    }

    /// Looping background music
    pub fn ambient(&self) -> PathBuf {
        self.resolve(AMBIENT_FILE)
    }

    /// Cue played for a key of this row
    pub fn cue(&self, row: KeyRow) -> PathBuf {
        self.resolve(match row {
            KeyRow::Top => TOP_CUE_FILE,
            KeyRow::Middle => MIDDLE_CUE_FILE,
            KeyRow::Bottom => BOTTOM_CUE_FILE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_join_base() {
        let assets = AssetLocator::new("/srv/audio");
        assert_eq!(
            assets.ambient(),
            PathBuf::from("/srv/audio/482783__mattiagiovanetti__ninja-tune.mp3")
        );
        assert_eq!(
            assets.cue(KeyRow::Middle),
            PathBuf::from("/srv/audio/471147__worldmaxter__sword-slide.mp3")
        );
    }

    #[test]
    fn test_each_row_has_its_own_cue() {
        let assets = AssetLocator::new("a");
        assert_ne!(assets.cue(KeyRow::Top), assets.cue(KeyRow::Middle));
        assert_ne!(assets.cue(KeyRow::Middle), assets.cue(KeyRow::Bottom));
        assert_ne!(assets.cue(KeyRow::Top), assets.cue(KeyRow::Bottom));
    }
}
