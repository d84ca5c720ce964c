use explore_keys::error::{self, RetryConfig};
use explore_keys::ExploreError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn quick_retry() -> RetryConfig {
    RetryConfig {
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(4),
        ..RetryConfig::default()
    }
}

#[tokio::test]
async fn test_retry_async_eventually_succeeds() {
    static ATTEMPTS: AtomicUsize = AtomicUsize::new(0);
    let result = error::retry_async(
        || async {
            let a = ATTEMPTS.fetch_add(1, Ordering::SeqCst);
            if a < 2 {
                Err(ExploreError::SpeechError("synthesizer busy".into()))
            } else {
                Ok(42u32)
            }
        },
        quick_retry(),
    )
    .await
    .expect("retry should succeed");
    assert_eq!(result, 42);
    assert_eq!(ATTEMPTS.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_retry_async_stops_on_permanent_error() {
    static ATTEMPTS: AtomicUsize = AtomicUsize::new(0);
    let result: explore_keys::Result<()> = error::retry_async(
        || async {
            ATTEMPTS.fetch_add(1, Ordering::SeqCst);
            Err(ExploreError::ConfigError("bad limit".into()))
        },
        quick_retry(),
    )
    .await;

    assert!(matches!(result, Err(ExploreError::ConfigError(_))));
    assert_eq!(ATTEMPTS.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_retry_async_gives_up_after_max_attempts() {
    static ATTEMPTS: AtomicUsize = AtomicUsize::new(0);
    let result: explore_keys::Result<()> = error::retry_async(
        || async {
            ATTEMPTS.fetch_add(1, Ordering::SeqCst);
            Err(ExploreError::IoError(std::io::Error::new(
                std::io::ErrorKind::Interrupted,
                "fail",
            )))
        },
        quick_retry().with_max_attempts(2),
    )
    .await;

    assert!(matches!(result, Err(ExploreError::IoError(_))));
    assert_eq!(ATTEMPTS.load(Ordering::SeqCst), 2);
}

#[test]
fn test_user_friendly_message_and_fallback() {
    let msg = error::user_friendly_message(&ExploreError::SpeechError("x".into()));
    assert!(msg.contains("Narration"));

    let fallback =
        error::create_fallback_strategy(&ExploreError::AudioError("no device".into())).unwrap();
    assert!(fallback.to_lowercase().contains("silent"));

    assert!(error::create_fallback_strategy(&ExploreError::ConfigError("x".into())).is_none());
}
