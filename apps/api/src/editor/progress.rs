//! Cosmetic progress bar shown while an extraction is in flight.
//!
//! It moves fast at first and crawls near the end; it never reaches 100 on
//! its own. Only a finished extraction sets 100.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;
use uuid::Uuid;

use crate::editor::store::SessionStore;

pub const TICK: Duration = Duration::from_millis(120);
pub const CAP: f32 = 98.0;

/// One tick of the schedule.
pub fn next_progress(current: f32) -> f32 {
    let step = if current < 30.0 {
        6.0
    } else if current < 70.0 {
        2.0
    } else if current < 90.0 {
        0.6
    } else {
        0.1
    };
    (current + step).min(CAP)
}

/// Advances a session's progress until dropped.
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    pub fn start(store: SessionStore, session_id: Uuid) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticks = interval(TICK);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // First tick fires immediately.
            ticks.tick().await;
            loop {
                ticks.tick().await;
                let still_running = store
                    .update(session_id, |s| {
                        if s.is_processing {
                            s.progress = next_progress(s.progress);
                        }
                        s.is_processing
                    })
                    .await;
                if still_running != Some(true) {
                    debug!("Progress ticker for {session_id} stopping");
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_phases() {
        assert_eq!(next_progress(0.0), 6.0);
        assert_eq!(next_progress(30.0), 32.0);
        assert!((next_progress(70.0) - 70.6).abs() < 1e-4);
        assert!((next_progress(95.0) - 95.1).abs() < 1e-4);
    }

    #[test]
    fn test_schedule_never_passes_cap() {
        let mut p = 0.0;
        for _ in 0..10_000 {
            p = next_progress(p);
        }
        assert_eq!(p, CAP);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_advances_and_stops_when_dropped() {
        let store = SessionStore::new();
        let session = store.create().await;
        store.update(session.id, |s| s.begin_processing()).await;

        let ticker = ProgressTicker::start(store.clone(), session.id);
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        let during = store.get(session.id).await.unwrap().progress;
        assert!(during > 0.0 && during <= CAP, "progress was {during}");

        drop(ticker);
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        let after = store.get(session.id).await.unwrap().progress;
        assert_eq!(after, during, "ticker kept running after drop");
    }
}
