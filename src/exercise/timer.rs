//! Exercise timer

use crate::exercise::dispatcher::ExerciseEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Sends [`ExerciseEvent::Tick`] once per period until stopped or dropped
#[derive(Debug)]
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
    period: Duration,
}

impl Ticker {
    /// Start ticking; the first tick arrives one full period from now.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(period: Duration, events: mpsc::Sender<ExerciseEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of an interval completes immediately
            ticks.tick().await;

            loop {
                ticks.tick().await;
                if events.send(ExerciseEvent::Tick).await.is_err() {
                    break;
                }
            }
        });

        tracing::debug!("Exercise timer started ({:?})", period);
        Self {
            handle: Some(handle),
            period,
        }
    }

    /// Cancel the timer; no tick is sent afterwards
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("Exercise timer stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, timeout};

    #[tokio::test]
    async fn test_ticks_arrive_periodically() {
        let (tx, mut rx) = mpsc::channel(16);
        let ticker = Ticker::start(Duration::from_millis(10), tx);
        assert!(ticker.is_running());

        for _ in 0..3 {
            let event = timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
            assert_eq!(event, Some(ExerciseEvent::Tick));
        }
    }

    #[tokio::test]
    async fn test_first_tick_waits_a_period() {
        let (tx, mut rx) = mpsc::channel(16);
        let _ticker = Ticker::start(Duration::from_millis(300), tx);

        assert!(timeout(Duration::from_millis(100), rx.recv()).await.is_err());
    }

    #[tokio::test]
    async fn test_stop_ends_ticks() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut ticker = Ticker::start(Duration::from_millis(10), tx);
        ticker.stop();
        assert!(!ticker.is_running());

        // The aborted task drops its sender, closing the channel
        let closed = timeout(Duration::from_secs(1), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());
    }

    #[tokio::test]
    async fn test_drop_stops_ticker() {
        let (tx, mut rx) = mpsc::channel(16);
        drop(Ticker::start(Duration::from_millis(10), tx));
        sleep(Duration::from_millis(50)).await;

        let closed = timeout(Duration::from_secs(1), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());
    }
}
