//! Sound shared by every screen
//!
//! Holds the audio output, the asset locations and the narrator. Narration
//! clips are played as they arrive, as long as no newer request replaced them.

use crate::audio::{AssetLocator, AudioOutput, Track};
use crate::config::ExploreConfig;
use crate::error::RetryConfig;
use crate::narration::{CommandSynthesizer, NarrationClip, Narrator, TtsOptions};
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct Playback {
    output: Box<dyn AudioOutput>,
    assets: AssetLocator,
    narrator: Option<Narrator>,
    clips: Option<mpsc::UnboundedReceiver<NarrationClip>>,
    narration_track: Option<Box<dyn Track>>,
}

impl Playback {
    /// Narration is only set up when enabled in `config`
    pub fn new(config: &ExploreConfig, output: Box<dyn AudioOutput>) -> Self {
        let (narrator, clips) = if config.narration.enabled {
            let synthesizer = Arc::new(CommandSynthesizer::from_config(&config.narration));
            let retry = RetryConfig::default().with_max_attempts(config.narration.max_attempts);
            let (narrator, clips) =
                Narrator::new(synthesizer, TtsOptions::new(config.language.clone()), retry);
            (Some(narrator), Some(clips))
        } else {
            tracing::info!("Narration disabled");
            (None, None)
        };

        Self {
            output,
            assets: AssetLocator::new(config.audio.asset_base.clone()),
            narrator,
            clips,
            narration_track: None,
        }
    }

    pub fn output(&self) -> &dyn AudioOutput {
        self.output.as_ref()
    }

    pub fn assets(&self) -> &AssetLocator {
        &self.assets
    }

    pub fn has_narrator(&self) -> bool {
        self.narrator.is_some()
    }

    /// Request speech for `text`. Must be called inside a tokio runtime.
    pub fn narrate(&mut self, text: String) {
        match &self.narrator {
            Some(narrator) => {
                let generation = narrator.request(text);
                tracing::debug!("Narration {} requested", generation);
            }
            None => tracing::debug!("Narration skipped: {}", text),
        }
    }

    /// Play the newest finished clip, dropping any that were superseded
    pub fn poll_narration(&mut self) {
        let (Some(narrator), Some(clips)) = (&self.narrator, &mut self.clips) else {
            return;
        };

        let mut newest = None;
        while let Ok(clip) = clips.try_recv() {
            if narrator.is_current(&clip) {
                newest = Some(clip);
            }
        }

        if let Some(clip) = newest {
            if let Some(mut previous) = self.narration_track.take() {
                previous.stop();
            }
            match self.output.open_bytes("narration", clip.audio) {
                Ok(mut track) => {
                    if let Err(e) = track.play() {
                        tracing::warn!("Narration playback failed: {}", e);
                    }
                    self.narration_track = Some(track);
                }
                Err(e) => tracing::warn!("Narration audio unusable: {}", e),
            }
        }
    }

    pub fn stop_narration(&mut self) {
        if let Some(narrator) = &self.narrator {
            narrator.cancel();
        }
        if let Some(mut track) = self.narration_track.take() {
            track.stop();
        }
    }
}
