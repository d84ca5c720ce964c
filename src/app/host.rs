//! Hosting one mount of the exercise
//!
//! Feeds key presses and timer ticks into the dispatcher and carries out the
//! commands it returns. Every command is safe to repeat.

use crate::app::playback::Playback;
use crate::audio::{AmbientAudioController, CueBank};
use crate::config::ExploreConfig;
use crate::exercise::{
    is_modifier_pressed, key_code_of, Command, ExerciseDispatcher, ExerciseEvent, ExerciseSession,
    SessionSnapshot, SessionTexts, Ticker,
};
use crate::i18n::Catalog;
use crate::models::{ExerciseRecord, GameCharacter};
use crossterm::event::KeyEvent;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Timer events buffered between two polls of the UI loop
const EVENT_BUFFER: usize = 16;

pub struct ExerciseHost {
    dispatcher: ExerciseDispatcher,
    snapshots: watch::Receiver<SessionSnapshot>,
    events_tx: mpsc::Sender<ExerciseEvent>,
    events_rx: mpsc::Receiver<ExerciseEvent>,
    ticker: Option<Ticker>,
    tick_interval: Duration,
    cues: CueBank,
    cues_loaded: bool,
    ambient: AmbientAudioController,
    focus_requested: bool,
    character: GameCharacter,
}

impl ExerciseHost {
    /// Fresh session using the configured limits and the catalog's texts
    pub fn new(config: &ExploreConfig, catalog: &Catalog) -> Self {
        let texts = SessionTexts::from_catalog(catalog, &config.character);
        let dispatcher = ExerciseDispatcher::new(ExerciseSession::new(config.limits(), texts));
        let snapshots = dispatcher.subscribe();
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);

        Self {
            dispatcher,
            snapshots,
            events_tx,
            events_rx,
            ticker: None,
            tick_interval: config.tick_interval(),
            cues: CueBank::empty(),
            cues_loaded: false,
            ambient: AmbientAudioController::new(config.audio.ambient_volume),
            focus_requested: false,
            character: config.character.clone(),
        }
    }

    /// Show the exercise: starts the timer, the ambient track and the intro
    /// narration. Must be called inside a tokio runtime.
    pub fn mount(&mut self, playback: &mut Playback) {
        let commands = self.dispatcher.dispatch(ExerciseEvent::Mount);
        if self.dispatcher.is_mounted() && self.ticker.is_none() && !self.is_completed() {
            self.ticker = Some(Ticker::start(self.tick_interval, self.events_tx.clone()));
        }
        self.run(commands, playback);
    }

    /// Count a key press from the terminal
    pub fn key_down(&mut self, key: &KeyEvent, playback: &mut Playback) {
        let event = ExerciseEvent::KeyDown {
            key_code: key_code_of(key),
            modifier_pressed: is_modifier_pressed(key),
        };
        let commands = self.dispatcher.dispatch(event);
        self.run(commands, playback);
    }

    /// Apply the timer ticks that arrived since the last call
    pub fn pump(&mut self, playback: &mut Playback) {
        while let Ok(event) = self.events_rx.try_recv() {
            let commands = self.dispatcher.dispatch(event);
            self.run(commands, playback);
        }
    }

    /// Leave the exercise: stops the timer and all exercise sound
    pub fn unmount(&mut self, playback: &mut Playback) {
        let commands = self.dispatcher.dispatch(ExerciseEvent::Unmount);
        self.run(commands, playback);
        // Ticks sent before the timer stopped are stale now
        while self.events_rx.try_recv().is_ok() {}
    }

    fn run(&mut self, commands: Vec<Command>, playback: &mut Playback) {
        for command in commands {
            tracing::trace!("Running {:?}", command);
            match command {
                Command::StartAmbient => {
                    self.ambient
                        .ensure_playing(playback.output(), playback.assets());
                }
                Command::LoadCues => {
                    if !self.cues_loaded {
                        self.cues = CueBank::load(playback.output(), playback.assets());
                        self.cues_loaded = true;
                    }
                }
                Command::PlayCue(row) => self.cues.play(row),
                Command::Narrate(text) => playback.narrate(text),
                Command::StopTimer => {
                    if let Some(mut ticker) = self.ticker.take() {
                        ticker.stop();
                    }
                }
                Command::FocusCallToAction => self.focus_requested = true,
                Command::StopAudio => {
                    self.ambient.stop();
                    self.cues.stop_all();
                    playback.stop_narration();
                }
            }
        }
    }

    /// The latest snapshot if it changed since the previous call
    pub fn take_snapshot(&mut self) -> Option<SessionSnapshot> {
        match self.snapshots.has_changed() {
            Ok(true) => Some(self.snapshots.borrow_and_update().clone()),
            _ => None,
        }
    }

    /// Current visible state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.dispatcher.snapshot()
    }

    /// Whether the call-to-action should receive focus; clears the request
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub fn is_completed(&self) -> bool {
        self.dispatcher.session().is_completed()
    }

    pub fn is_mounted(&self) -> bool {
        self.dispatcher.is_mounted()
    }

    pub fn is_timer_running(&self) -> bool {
        self.ticker.as_ref().map_or(false, Ticker::is_running)
    }

    pub fn character(&self) -> &GameCharacter {
        &self.character
    }

    /// Record of the finished exercise, `None` while in progress
    pub fn record(&self) -> Option<ExerciseRecord> {
        self.dispatcher
            .session()
            .record(self.dispatcher.tracker(), &self.character.name)
    }
}

impl Drop for ExerciseHost {
    fn drop(&mut self) {
        // The ticker stops itself when dropped
        if self.is_mounted() {
            self.ambient.stop();
            self.cues.stop_all();
        }
    }
}
