//! Narration
//!
//! Text-to-speech for the header and intro texts. Synthesis runs in the
//! background; failures are logged and never reach the learner.

pub mod narrator;
pub mod synth;
pub mod trigger;

pub use narrator::{NarrationClip, Narrator};
pub use synth::{CommandSynthesizer, SpeechSynthesizer, SynthesisFuture, TtsOptions};
pub use trigger::NarrationTrigger;
