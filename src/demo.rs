//! Simulated taps for trying the overlay without an instrumented app.

use std::time::Duration;

use tokio::sync::watch;
use uxlatency_sdk::Tracker;
use uxlatency_types::Report;

/// Interaction ids cycled through by the simulation.
pub const DEMO_IDS: [&str; 4] = ["login-button", "profile-tab", "search-card", "checkout-button"];

/// Feedback delays cycled through by the simulation, covering every tier.
pub const DEMO_LATENCIES_MS: [u64; 5] = [120, 350, 610, 980, 240];

/// Pause between simulated taps.
pub const DEMO_PAUSE: Duration = Duration::from_millis(400);

/// Record simulated taps on `tracker` and publish a report after each.
///
/// Runs `rounds` taps, or until every receiver of `tx` is gone when
/// `rounds` is `None`.
pub async fn simulate(tracker: Tracker, tx: watch::Sender<Report>, rounds: Option<usize>) {
    let mut tap = 0usize;

    while rounds.map_or(true, |r| tap < r) {
        let id = DEMO_IDS[tap % DEMO_IDS.len()];
        let delay = Duration::from_millis(DEMO_LATENCIES_MS[tap % DEMO_LATENCIES_MS.len()]);

        tracker.record_start(id);
        tokio::time::sleep(delay).await;
        tracker.record_feedback(id);

        if tx.send(tracker.report()).is_err() {
            break;
        }

        tap += 1;
        tokio::time::sleep(DEMO_PAUSE).await;
    }

    tracing::debug!(taps = tap, "demo simulation finished");
}
