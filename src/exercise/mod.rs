//! Exercise core
//!
//! Key row classification, the session state machine, the dispatcher that
//! owns a mounted session, and the one-second timer.

pub mod dispatcher;
pub mod keys;
pub mod session;
pub mod timer;

pub use dispatcher::{ExerciseDispatcher, ExerciseEvent, SessionSnapshot};
pub use keys::{classify, is_modifier_pressed, key_code_of, KeyRow};
pub use session::{Command, ExerciseSession, Limits, Phase, SessionTexts};
pub use timer::Ticker;
