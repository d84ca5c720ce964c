//! Exercise dispatcher
//!
//! Owns the session, its progress tracker and the narration trigger for one
//! mount of the exercise screen. Events go in, an ordered list of commands
//! comes out, and subscribers see a fresh [`SessionSnapshot`] whenever the
//! visible state changes.

use crate::exercise::keys::{classify, KeyRow};
use crate::exercise::session::{Command, ExerciseSession, Limits, Phase};
use crate::models::ProgressTracker;
use crate::narration::NarrationTrigger;
use tokio::sync::watch;

/// Input to the exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseEvent {
    /// The exercise screen was shown
    Mount,
    KeyDown { key_code: u32, modifier_pressed: bool },
    /// One timer period elapsed
    Tick,
    /// The exercise screen was left
    Unmount,
}

/// Everything the screen needs to draw the exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub elapsed_seconds: u32,
    pub keystrokes: u32,
    pub limits: Limits,
    pub header_text: String,
    pub intro_text: String,
    /// Row of the most recent cue
    pub last_row: Option<KeyRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mount {
    Pending,
    Mounted,
    Unmounted,
}

/// Serves a single mount: events before `Mount` or after `Unmount` are ignored
pub struct ExerciseDispatcher {
    session: ExerciseSession,
    tracker: ProgressTracker,
    trigger: NarrationTrigger,
    mount: Mount,
    last_row: Option<KeyRow>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl ExerciseDispatcher {
    pub fn new(session: ExerciseSession) -> Self {
        let tracker = ProgressTracker::new();
        let initial = Self::snapshot_of(&session, &tracker, None);
        let (snapshots, _) = watch::channel(initial);

        Self {
            session,
            tracker,
            trigger: NarrationTrigger::new(),
            mount: Mount::Pending,
            last_row: None,
            snapshots,
        }
    }

    /// Receive a snapshot every time the visible state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    /// Apply one event and return the side effects it causes, in order
    pub fn dispatch(&mut self, event: ExerciseEvent) -> Vec<Command> {
        let mut commands = match (self.mount, event) {
            (Mount::Pending, ExerciseEvent::Mount) => {
                self.mount = Mount::Mounted;
                tracing::info!("Exercise mounted");
                vec![Command::StartAmbient, Command::LoadCues]
            }
            (
                Mount::Mounted,
                ExerciseEvent::KeyDown {
                    key_code,
                    modifier_pressed,
                },
            ) => {
                let commands =
                    self.session
                        .on_key_down(key_code, modifier_pressed, &mut self.tracker);
                if commands
                    .iter()
                    .any(|command| matches!(command, Command::PlayCue(_)))
                {
                    self.last_row = classify(key_code);
                }
                commands
            }
            (Mount::Mounted, ExerciseEvent::Tick) => self.session.tick(&mut self.tracker),
            (Mount::Mounted, ExerciseEvent::Unmount) => {
                self.mount = Mount::Unmounted;
                tracing::info!(
                    "Exercise unmounted after {}s and {} keystrokes",
                    self.session.elapsed_seconds(),
                    self.tracker.type_count()
                );
                return vec![Command::StopTimer, Command::StopAudio];
            }
            (mount, event) => {
                tracing::trace!("Ignoring {:?} while {:?}", event, mount);
                return Vec::new();
            }
        };

        if let Some(text) = self
            .trigger
            .observe(self.session.header_text(), self.session.intro_text())
        {
            commands.push(Command::Narrate(text));
        }

        self.publish();
        commands
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    fn snapshot_of(
        session: &ExerciseSession,
        tracker: &ProgressTracker,
        last_row: Option<KeyRow>,
    ) -> SessionSnapshot {
        SessionSnapshot {
            phase: session.phase(),
            elapsed_seconds: session.elapsed_seconds(),
            keystrokes: tracker.type_count(),
            limits: session.limits(),
            header_text: session.header_text().to_string(),
            intro_text: session.intro_text().to_string(),
            last_row,
        }
    }

    /// Current visible state
    pub fn snapshot(&self) -> SessionSnapshot {
        Self::snapshot_of(&self.session, &self.tracker, self.last_row)
    }

    pub fn session(&self) -> &ExerciseSession {
        &self.session
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn is_mounted(&self) -> bool {
        self.mount == Mount::Mounted
    }
}
