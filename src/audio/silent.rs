//! Silent audio output
//!
//! Plays nothing but keeps a journal of every track operation, so the app
//! behaves the same with or without a sound device.

use crate::audio::{AudioOutput, Track};
use crate::Result;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackAction {
    Opened,
    Played,
    Rewound,
    Stopped,
    Volume(f32),
}

/// One journaled operation on a named track
#[derive(Debug, Clone, PartialEq)]
pub struct AudioEvent {
    pub track: String,
    pub action: TrackAction,
}

type Journal = Arc<Mutex<Vec<AudioEvent>>>;

fn record(journal: &Journal, track: &str, action: TrackAction) {
    tracing::trace!("silent audio: {} {:?}", track, action);
    if let Ok(mut events) = journal.lock() {
        events.push(AudioEvent {
            track: track.to_string(),
            action,
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct SilentOutput {
    journal: Journal,
}

impl SilentOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation performed so far, in order
    pub fn events(&self) -> Vec<AudioEvent> {
        self.journal
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Operations performed on one track
    pub fn actions_for(&self, track: &str) -> Vec<TrackAction> {
        self.events()
            .into_iter()
            .filter(|event| event.track == track)
            .map(|event| event.action)
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.journal.lock() {
            events.clear();
        }
    }

    fn open(&self, name: String) -> Box<dyn Track> {
        record(&self.journal, &name, TrackAction::Opened);
        Box::new(SilentTrack {
            name,
            playing: false,
            journal: Arc::clone(&self.journal),
        })
    }
}

impl AudioOutput for SilentOutput {
    fn open_file(&self, path: &Path, _looping: bool) -> Result<Box<dyn Track>> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(self.open(name))
    }

    fn open_bytes(&self, name: &str, _bytes: Vec<u8>) -> Result<Box<dyn Track>> {
        Ok(self.open(name.to_string()))
    }
}

struct SilentTrack {
    name: String,
    playing: bool,
    journal: Journal,
}

impl Track for SilentTrack {
    fn play(&mut self) -> Result<()> {
        self.playing = true;
        record(&self.journal, &self.name, TrackAction::Played);
        Ok(())
    }

    fn rewind(&mut self) -> Result<()> {
        record(&self.journal, &self.name, TrackAction::Rewound);
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
        record(&self.journal, &self.name, TrackAction::Stopped);
    }

    fn set_volume(&mut self, volume: f32) {
        record(&self.journal, &self.name, TrackAction::Volume(volume));
    }

    fn is_paused(&self) -> bool {
        !self.playing
    }
}
