//! Speech synthesizers

use crate::config::NarrationConfig;
use crate::{ExploreError, Result};
use std::future::Future;
use std::pin::Pin;
use tokio::process::Command;

/// Options passed to every synthesis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsOptions {
    pub language: String,
}

impl TtsOptions {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

pub type SynthesisFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;

/// Turns text into playable audio bytes
pub trait SpeechSynthesizer: Send + Sync + 'static {
    fn synthesize<'a>(&'a self, text: &'a str, options: &'a TtsOptions) -> SynthesisFuture<'a>;
}

/// Runs an external speech program that writes audio to stdout
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
}

impl CommandSynthesizer {
    /// `args` come before the text; `{language}` in them is replaced
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &NarrationConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list for one request
    pub fn command_args(&self, text: &str, options: &TtsOptions) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace("{language}", &options.language))
            .chain(std::iter::once(text.to_string()))
            .collect()
    }

    async fn run(&self, text: &str, options: &TtsOptions) -> Result<Vec<u8>> {
        let output = Command::new(&self.program)
            .args(self.command_args(text, options))
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            return Err(ExploreError::SpeechError(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        if output.stdout.is_empty() {
            return Err(ExploreError::SpeechError(format!(
                "{} produced no audio",
                self.program
            )));
        }

        Ok(output.stdout)
    }
}

impl SpeechSynthesizer for CommandSynthesizer {
    fn synthesize<'a>(&'a self, text: &'a str, options: &'a TtsOptions) -> SynthesisFuture<'a> {
        Box::pin(self.run(text, options))
    }
}
