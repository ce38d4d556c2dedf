//! Refresh scheduling.
//!
//! The ticker is a cancellable background task rather than a bare repeating
//! timer, so it can be stopped deterministically (and exercised under paused
//! time in tests).

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};

use crate::app::AppEvent;

/// Fixed-interval ticker feeding `RefreshDue` events into the app channel.
pub struct RefreshTicker {
    stop: broadcast::Sender<()>,
}

impl RefreshTicker {
    /// Spawn the ticker task. The first event fires one full period after
    /// start; the initial load is the app's responsibility.
    pub fn start(period: Duration, tx: mpsc::Sender<AppEvent>) -> Self {
        let (stop_tx, mut stop_rx) = broadcast::channel(1);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            // The first tick of a tokio interval completes immediately
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = stop_rx.recv() => {
                        break;
                    }
                    _ = interval.tick() => {
                        if tx.send(AppEvent::RefreshDue).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { stop: stop_tx }
    }

    /// Cancel the ticker. No further events fire after this returns and the
    /// task observes the signal.
    pub fn stop(&self) {
        let _ = self.stop.send(());
    }
}
