//! Sound device output backed by rodio

use crate::audio::{AudioOutput, Track};
use crate::{ExploreError, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

pub struct RodioOutput {
    // Dropping the stream silences every sink
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl RodioOutput {
    /// Open the default output device
    pub fn try_default() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| ExploreError::AudioError(format!("no output device: {}", e)))?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    fn track(&self, name: &str, data: Vec<u8>, looping: bool) -> Result<Box<dyn Track>> {
        let data: Arc<[u8]> = data.into();
        // Reject undecodable data up front rather than on first play
        Decoder::new(Cursor::new(Arc::clone(&data)))
            .map_err(|e| ExploreError::AudioError(format!("cannot decode {}: {}", name, e)))?;

        Ok(Box::new(RodioTrack {
            handle: self.handle.clone(),
            data,
            looping,
            volume: 1.0,
            sink: None,
        }))
    }
}

impl AudioOutput for RodioOutput {
    fn open_file(&self, path: &Path, looping: bool) -> Result<Box<dyn Track>> {
        let data = fs::read(path).map_err(|e| {
            ExploreError::AudioError(format!("cannot read {}: {}", path.display(), e))
        })?;
        self.track(&path.display().to_string(), data, looping)
    }

    fn open_bytes(&self, name: &str, bytes: Vec<u8>) -> Result<Box<dyn Track>> {
        self.track(name, bytes, false)
    }
}

/// Decodes from the in-memory data on every fresh start, so rewinding is
/// dropping the current sink.
struct RodioTrack {
    handle: OutputStreamHandle,
    data: Arc<[u8]>,
    looping: bool,
    volume: f32,
    sink: Option<Sink>,
}

impl Track for RodioTrack {
    fn play(&mut self) -> Result<()> {
        if let Some(sink) = &self.sink {
            if !sink.empty() {
                sink.play();
                return Ok(());
            }
        }

        let sink = Sink::try_new(&self.handle)
            .map_err(|e| ExploreError::AudioError(format!("cannot open sink: {}", e)))?;
        let source = Decoder::new(Cursor::new(Arc::clone(&self.data)))
            .map_err(|e| ExploreError::AudioError(format!("cannot decode: {}", e)))?;

        if self.looping {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }
        sink.set_volume(self.volume);
        self.sink = Some(sink);
        Ok(())
    }

    fn rewind(&mut self) -> Result<()> {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn is_paused(&self) -> bool {
        self.sink
            .as_ref()
            .map_or(true, |sink| sink.is_paused() || sink.empty())
    }
}
