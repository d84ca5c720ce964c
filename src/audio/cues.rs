//! Row cue tracks

use crate::audio::{AssetLocator, AudioOutput, Track};
use crate::exercise::keys::KeyRow;

/// The three row cues, indexed by [`KeyRow::index`]
#[derive(Default)]
pub struct CueBank {
    tracks: [Option<Box<dyn Track>>; 3],
}

impl CueBank {
    /// Bank with nothing loaded
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every row cue; tracks that fail to open are logged and left out
    pub fn load(output: &dyn AudioOutput, assets: &AssetLocator) -> Self {
        let mut bank = Self::empty();
        for row in KeyRow::ALL {
            let path = assets.cue(row);
            match output.open_file(&path, false) {
                Ok(track) => bank.tracks[row.index()] = Some(track),
                Err(e) => tracing::warn!("Cue for {:?} unavailable ({}): {}", row, path.display(), e),
            }
        }
        bank
    }

    /// Rewind every cue, then play the one for `row`
    pub fn play(&mut self, row: KeyRow) {
        for track in self.tracks.iter_mut().flatten() {
            if let Err(e) = track.rewind() {
                tracing::warn!("Failed to rewind cue: {}", e);
            }
        }

        match self.tracks[row.index()].as_mut() {
            Some(track) => {
                if let Err(e) = track.play() {
                    tracing::error!("Play error for {:?} cue: {}", row, e);
                }
            }
            None => tracing::debug!("No cue loaded for {:?}", row),
        }
    }

    pub fn stop_all(&mut self) {
        for track in self.tracks.iter_mut().flatten() {
            track.stop();
        }
    }

    /// Number of cues that loaded
    pub fn loaded_count(&self) -> usize {
        self.tracks.iter().filter(|track| track.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::assets::{BOTTOM_CUE_FILE, MIDDLE_CUE_FILE, TOP_CUE_FILE};
    use crate::audio::{SilentOutput, TrackAction};
    use crate::{ExploreError, Result};
    use std::path::Path;

    /// Refuses to open the middle cue
    struct PartialOutput(SilentOutput);

    impl AudioOutput for PartialOutput {
        fn open_file(&self, path: &Path, looping: bool) -> Result<Box<dyn Track>> {
            if path.ends_with(MIDDLE_CUE_FILE) {
                return Err(ExploreError::AudioError("unsupported format".to_string()));
            }
            self.0.open_file(path, looping)
        }

        fn open_bytes(&self, name: &str, bytes: Vec<u8>) -> Result<Box<dyn Track>> {
            self.0.open_bytes(name, bytes)
        }
    }

    #[test]
    fn test_play_rewinds_all_then_plays_one() {
        let output = SilentOutput::new();
        let mut bank = CueBank::load(&output, &AssetLocator::new("audio"));
        assert_eq!(bank.loaded_count(), 3);
        output.clear();

        bank.play(KeyRow::Middle);

        assert_eq!(output.actions_for(TOP_CUE_FILE), vec![TrackAction::Rewound]);
        assert_eq!(
            output.actions_for(MIDDLE_CUE_FILE),
            vec![TrackAction::Rewound, TrackAction::Played]
        );
        assert_eq!(output.actions_for(BOTTOM_CUE_FILE), vec![TrackAction::Rewound]);
        // The played cue comes after every rewind
        assert_eq!(output.events().last().unwrap().action, TrackAction::Played);
    }

    #[test]
    fn test_missing_cue_is_skipped() {
        let silent = SilentOutput::new();
        let mut bank = CueBank::load(&PartialOutput(silent.clone()), &AssetLocator::new("audio"));
        assert_eq!(bank.loaded_count(), 2);

        bank.play(KeyRow::Middle);
        bank.play(KeyRow::Top);

        assert!(silent.actions_for(MIDDLE_CUE_FILE).is_empty());
        assert!(silent.actions_for(TOP_CUE_FILE).contains(&TrackAction::Played));
    }

    #[test]
    fn test_empty_bank_plays_nothing() {
        let mut bank = CueBank::empty();
        bank.play(KeyRow::Top);
        bank.stop_all();
        assert_eq!(bank.loaded_count(), 0);
    }
}
