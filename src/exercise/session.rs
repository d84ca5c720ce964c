//! Exercise session state machine
//!
//! Tracks elapsed time against the keystroke count kept by a
//! [`ProgressTracker`] and moves once, irreversibly, from `InProgress` to
//! `Completed` when either limit is crossed. Every side effect is returned
//! as a [`Command`] for the caller to carry out.

use crate::exercise::keys::{classify, KeyRow};
use crate::i18n::{self, Catalog};
use crate::models::{CompletionReason, ExerciseRecord, GameCharacter, ProgressTracker};

/// Seconds the exercise runs before completing
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 60;
/// Keystrokes allowed before completing
pub const DEFAULT_KEYSTROKE_LIMIT: u32 = 50;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    InProgress,
    /// Terminal
    Completed,
}

/// Side effect requested by the exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the ambient music if it is not already playing
    StartAmbient,
    /// Load the three row cue tracks
    LoadCues,
    /// Rewind all cues, then play the cue of this row
    PlayCue(KeyRow),
    /// Synthesize and play this text
    Narrate(String),
    /// Cancel the exercise timer
    StopTimer,
    /// Give input focus to the call-to-action control
    FocusCallToAction,
    /// Silence ambient, cue and narration audio
    StopAudio,
}

/// Completion limits; both are exclusive, the session completes only once a
/// value goes past its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub time_limit_secs: u32,
    pub keystroke_limit: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_LIMIT_SECS, DEFAULT_KEYSTROKE_LIMIT)
    }
}

impl Limits {
    pub fn new(time_limit_secs: u32, keystroke_limit: u32) -> Self {
        Self {
            time_limit_secs,
            keystroke_limit,
        }
    }

    /// The limit crossed by these values, if any
    pub fn exceeded(&self, elapsed_seconds: u32, keystrokes: u32) -> Option<CompletionReason> {
        if elapsed_seconds > self.time_limit_secs {
            Some(CompletionReason::TimeLimit)
        } else if keystrokes > self.keystroke_limit {
            Some(CompletionReason::KeystrokeLimit)
        } else {
            None
        }
    }
}

/// Header and intro texts for both phases, already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTexts {
    pub intro_header: String,
    pub intro_text: String,
    pub completed_header: String,
    pub completed_text: String,
}

impl SessionTexts {
    /// Resolve the texts from a catalog; the completion text names the character
    pub fn from_catalog(catalog: &Catalog, character: &GameCharacter) -> Self {
        Self {
            intro_header: catalog.t(i18n::INTRO_HEADER),
            intro_text: catalog.t(i18n::INTRO_TEXT),
            completed_header: catalog.t(i18n::COMPLETED_HEADER),
            completed_text: format!(
                "{} {} {}",
                catalog.t(i18n::WELL_DONE),
                character.name,
                catalog.t(i18n::READY_TEXT)
            ),
        }
    }
}

/// One run of the exercise
#[derive(Debug, Clone)]
pub struct ExerciseSession {
    limits: Limits,
    texts: SessionTexts,
    elapsed_seconds: u32,
    phase: Phase,
    header_text: String,
    intro_text: String,
    completion_reason: Option<CompletionReason>,
}

impl ExerciseSession {
    pub fn new(limits: Limits, texts: SessionTexts) -> Self {
        Self {
            header_text: texts.intro_header.clone(),
            intro_text: texts.intro_text.clone(),
            limits,
            texts,
            elapsed_seconds: 0,
            phase: Phase::InProgress,
            completion_reason: None,
        }
    }

    /// Handle a key-down.
    ///
    /// The keystroke is counted before the cue is chosen and before the
    /// completion check, so the key that crosses the limit completes the
    /// session. Does nothing once completed.
    pub fn on_key_down(
        &mut self,
        key_code: u32,
        modifier_pressed: bool,
        tracker: &mut ProgressTracker,
    ) -> Vec<Command> {
        if self.is_completed() {
            return Vec::new();
        }

        tracker.increase_type();

        let mut commands = Vec::new();
        if !modifier_pressed {
            if let Some(row) = classify(key_code) {
                commands.push(Command::PlayCue(row));
            }
        }

        self.check_completion(tracker, &mut commands);
        commands
    }

    /// Advance the clock by one second. Does nothing once completed.
    pub fn tick(&mut self, tracker: &mut ProgressTracker) -> Vec<Command> {
        if self.is_completed() {
            return Vec::new();
        }

        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);

        let mut commands = Vec::new();
        self.check_completion(tracker, &mut commands);
        commands
    }

    fn check_completion(&mut self, tracker: &mut ProgressTracker, commands: &mut Vec<Command>) {
        let Some(reason) = self
            .limits
            .exceeded(self.elapsed_seconds, tracker.type_count())
        else {
            return;
        };

        // Texts and phase change together
        self.phase = Phase::Completed;
        self.completion_reason = Some(reason);
        self.header_text = self.texts.completed_header.clone();
        self.intro_text = self.texts.completed_text.clone();
        tracker.mark_completed();

        tracing::info!(
            "Exercise completed by {} after {}s and {} keystrokes",
            reason,
            self.elapsed_seconds,
            tracker.type_count()
        );

        commands.push(Command::StopTimer);
        commands.push(Command::FocusCallToAction);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn header_text(&self) -> &str {
        &self.header_text
    }

    pub fn intro_text(&self) -> &str {
        &self.intro_text
    }

    pub fn completion_reason(&self) -> Option<CompletionReason> {
        self.completion_reason
    }

    /// Header and intro joined by a single space
    pub fn narration_text(&self) -> String {
        format!("{} {}", self.header_text, self.intro_text)
    }

    /// Record of a completed session, `None` while in progress
    pub fn record(&self, tracker: &ProgressTracker, character: &str) -> Option<ExerciseRecord> {
        self.completion_reason.map(|reason| {
            ExerciseRecord::new(self.elapsed_seconds, tracker.type_count(), character, reason)
        })
    }
}
