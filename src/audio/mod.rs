//! Audio playback
//!
//! Ambient music, row cues and narration clips are played through the
//! [`AudioOutput`] seam. Playback failures are logged and never interrupt
//! the exercise.

pub mod ambient;
pub mod assets;
pub mod cues;
#[cfg(feature = "audio")]
pub mod rodio_backend;
pub mod silent;

pub use ambient::AmbientAudioController;
pub use assets::AssetLocator;
pub use cues::CueBank;
pub use silent::{AudioEvent, SilentOutput, TrackAction};

use crate::Result;
use std::path::Path;

/// A loaded, playable sound
pub trait Track {
    /// Start or resume playback
    fn play(&mut self) -> Result<()>;
    /// Move back to the start; the next `play` starts from position zero
    fn rewind(&mut self) -> Result<()>;
    /// Stop playback
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
    /// Whether the track is currently silent
    fn is_paused(&self) -> bool;
}

/// Opens tracks on an audio device
pub trait AudioOutput {
    /// Open a sound file; looping tracks restart when they end
    fn open_file(&self, path: &Path, looping: bool) -> Result<Box<dyn Track>>;
    /// Open in-memory audio, e.g. a synthesized narration clip
    fn open_bytes(&self, name: &str, bytes: Vec<u8>) -> Result<Box<dyn Track>>;
}

/// Pick the audio output: the sound device when enabled and available,
/// silent output otherwise
pub fn select_output(enabled: bool) -> Box<dyn AudioOutput> {
    if !enabled {
        tracing::info!("Audio disabled, using silent output");
        return Box::new(SilentOutput::new());
    }

    #[cfg(feature = "audio")]
    {
        match rodio_backend::RodioOutput::try_default() {
            Ok(output) => {
                tracing::info!("Using default audio device");
                return Box::new(output);
            }
            Err(e) => {
                if let Some(fallback) = crate::error::create_fallback_strategy(&e) {
                    tracing::warn!("{} {}", e, fallback);
                }
            }
        }
    }

    #[cfg(not(feature = "audio"))]
    tracing::info!("Built without the audio feature, using silent output");

    Box::new(SilentOutput::new())
}
