//! Background narration requests
//!
//! Each request is synthesized on its own tokio task and delivered as a
//! [`NarrationClip`]. A newer request supersedes older ones still in flight.

use crate::error::{retry_async, RetryConfig};
use crate::narration::synth::{SpeechSynthesizer, TtsOptions};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Synthesized audio for one narration request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationClip {
    pub generation: u64,
    pub text: String,
    pub audio: Vec<u8>,
}

pub struct Narrator {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    options: TtsOptions,
    retry: RetryConfig,
    generation: Arc<AtomicU64>,
    clips: mpsc::UnboundedSender<NarrationClip>,
}

impl Narrator {
    /// Create a narrator and the receiver its clips arrive on
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        options: TtsOptions,
        retry: RetryConfig,
    ) -> (Self, mpsc::UnboundedReceiver<NarrationClip>) {
        let (clips, rx) = mpsc::unbounded_channel();
        (
            Self {
                synthesizer,
                options,
                retry,
                generation: Arc::new(AtomicU64::new(0)),
                clips,
            },
            rx,
        )
    }

    /// Start synthesizing `text`; returns the request's generation.
    ///
    /// Must be called inside a tokio runtime.
    pub fn request(&self, text: String) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let synthesizer = Arc::clone(&self.synthesizer);
        let options = self.options.clone();
        let retry = self.retry.clone();
        let latest = Arc::clone(&self.generation);
        let clips = self.clips.clone();

        tokio::spawn(async move {
            let result = retry_async(|| synthesizer.synthesize(&text, &options), retry).await;

            match result {
                Ok(audio) => {
                    if latest.load(Ordering::SeqCst) != generation {
                        tracing::debug!("Narration {} superseded, dropping", generation);
                        return;
                    }
                    if clips
                        .send(NarrationClip {
                            generation,
                            text,
                            audio,
                        })
                        .is_err()
                    {
                        tracing::debug!("Narration {} finished after shutdown", generation);
                    }
                }
                Err(e) => tracing::warn!("Narration failed: {}", e),
            }
        });

        generation
    }

    /// Generation of the most recent request
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether a clip belongs to the most recent request
    pub fn is_current(&self, clip: &NarrationClip) -> bool {
        clip.generation == self.latest_generation()
    }

    /// Make every request so far stale; their clips are never delivered
    pub fn cancel(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Narration cancelled up to {}", generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::synth::SynthesisFuture;
    use crate::ExploreError;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::timeout;

    /// Echoes the text back as audio, failing the first `failures` calls
    struct EchoSynth {
        failures: Mutex<usize>,
        calls: Mutex<Vec<(String, String)>>,
        delay: Duration,
    }

    impl EchoSynth {
        fn new(failures: usize) -> Self {
            Self {
                failures: Mutex::new(failures),
                calls: Mutex::new(Vec::new()),
                delay: Duration::ZERO,
            }
        }
    }

    impl SpeechSynthesizer for EchoSynth {
        fn synthesize<'a>(&'a self, text: &'a str, options: &'a TtsOptions) -> SynthesisFuture<'a> {
            Box::pin(async move {
                self.calls
                    .lock()
                    .unwrap()
                    .push((text.to_string(), options.language.clone()));
                if text.starts_with("slow") {
                    tokio::time::sleep(self.delay.max(Duration::from_millis(200))).await;
                }
                let mut failures = self.failures.lock().unwrap();
                if *failures > 0 {
                    *failures -= 1;
                    return Err(ExploreError::SpeechError("busy".to_string()));
                }
                Ok(text.as_bytes().to_vec())
            })
        }
    }

    fn fast_retry(attempts: usize) -> RetryConfig {
        RetryConfig {
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            ..RetryConfig::default()
        }
        .with_max_attempts(attempts)
    }

    #[tokio::test]
    async fn test_request_delivers_clip() {
        let synth = Arc::new(EchoSynth::new(0));
        let (narrator, mut rx) = Narrator::new(synth.clone(), TtsOptions::new("et"), fast_retry(1));

        let generation = narrator.request("Hello world".to_string());
        let clip = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();

        assert_eq!(clip.generation, generation);
        assert_eq!(clip.audio, b"Hello world".to_vec());
        assert!(narrator.is_current(&clip));
        assert_eq!(
            synth.calls.lock().unwrap()[0],
            ("Hello world".to_string(), "et".to_string())
        );
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let synth = Arc::new(EchoSynth::new(1));
        let (narrator, mut rx) = Narrator::new(synth.clone(), TtsOptions::new("en"), fast_retry(3));

        narrator.request("again".to_string());
        let clip = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();

        assert_eq!(clip.audio, b"again".to_vec());
        assert_eq!(synth.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_is_swallowed() {
        let synth = Arc::new(EchoSynth::new(5));
        let (narrator, mut rx) = Narrator::new(synth, TtsOptions::new("en"), fast_retry(2));

        narrator.request("never".to_string());
        let outcome = timeout(Duration::from_millis(300), rx.recv()).await;
        assert!(outcome.is_err(), "no clip should arrive");
    }

    #[tokio::test]
    async fn test_newer_request_supersedes_older() {
        let synth = Arc::new(EchoSynth::new(0));
        let (narrator, mut rx) = Narrator::new(synth, TtsOptions::new("en"), fast_retry(1));

        narrator.request("slow intro".to_string());
        let second = narrator.request("done".to_string());

        let clip = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
        assert_eq!(clip.generation, second);
        assert_eq!(clip.text, "done");

        // The slow first request finishes later and is dropped
        let late = timeout(Duration::from_millis(400), rx.recv()).await;
        assert!(late.is_err());
    }

    #[tokio::test]
    async fn test_cancel_drops_in_flight_request() {
        let synth = Arc::new(EchoSynth::new(0));
        let (narrator, mut rx) = Narrator::new(synth, TtsOptions::new("en"), fast_retry(1));

        narrator.request("slow intro".to_string());
        narrator.cancel();

        let late = timeout(Duration::from_millis(400), rx.recv()).await;
        assert!(late.is_err(), "cancelled narration must not arrive");
    }

    #[tokio::test]
    async fn test_cancel_makes_queued_clip_stale() {
        let synth = Arc::new(EchoSynth::new(0));
        let (narrator, mut rx) = Narrator::new(synth, TtsOptions::new("en"), fast_retry(1));

        narrator.request("ready".to_string());
        let clip = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
        assert!(narrator.is_current(&clip));

        narrator.cancel();
        assert!(!narrator.is_current(&clip));

        // Requests after a cancel are delivered again
        let next = narrator.request("after".to_string());
        let clip = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
        assert_eq!(clip.generation, next);
        assert!(narrator.is_current(&clip));
    }
}
