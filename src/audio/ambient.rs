//! Ambient music

use crate::audio::{AssetLocator, AudioOutput, Track};

/// Starts the looping background track at most once per mount
pub struct AmbientAudioController {
    volume: f32,
    started: bool,
    track: Option<Box<dyn Track>>,
}

impl AmbientAudioController {
    pub fn new(volume: f32) -> Self {
        Self {
            volume,
            started: false,
            track: None,
        }
    }

    /// Make sure the ambient track is playing. Only the first call after
    /// creation does anything; failures are logged.
    pub fn ensure_playing(&mut self, output: &dyn AudioOutput, assets: &AssetLocator) {
        if self.started {
            return;
        }
        self.started = true;

        let path = assets.ambient();
        let mut track = match output.open_file(&path, true) {
            Ok(track) => track,
            Err(e) => {
                tracing::error!("Audio error opening {}: {}", path.display(), e);
                return;
            }
        };

        if track.is_paused() {
            track.set_volume(self.volume);
            if let Err(e) = track.play() {
                tracing::error!("Audio error: {}", e);
            }
        }
        self.track = Some(track);
    }

    pub fn stop(&mut self) {
        if let Some(track) = self.track.as_mut() {
            track.stop();
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::assets::AMBIENT_FILE;
    use crate::audio::{SilentOutput, TrackAction};

    #[test]
    fn test_starts_once_at_volume() {
        let output = SilentOutput::new();
        let assets = AssetLocator::new("audio");
        let mut ambient = AmbientAudioController::new(0.1);

        ambient.ensure_playing(&output, &assets);
        ambient.ensure_playing(&output, &assets);
        ambient.ensure_playing(&output, &assets);

        assert!(ambient.is_started());
        assert_eq!(
            output.actions_for(AMBIENT_FILE),
            vec![
                TrackAction::Opened,
                TrackAction::Volume(0.1),
                TrackAction::Played
            ]
        );
    }

    #[test]
    fn test_stop_silences_track() {
        let output = SilentOutput::new();
        let mut ambient = AmbientAudioController::new(0.1);
        ambient.ensure_playing(&output, &AssetLocator::new("audio"));
        ambient.stop();

        assert_eq!(
            output.actions_for(AMBIENT_FILE).last(),
            Some(&TrackAction::Stopped)
        );
    }

    #[test]
    fn test_stop_before_start_is_harmless() {
        let mut ambient = AmbientAudioController::new(0.1);
        ambient.stop();
        assert!(!ambient.is_started());
    }
}
