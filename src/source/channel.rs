//! Channel-based report source.
//!
//! Receives reports via a tokio watch channel, for a tracker running in
//! the same process as the overlay.

use tokio::sync::watch;
use uxlatency_types::Report;

use super::ReportSource;

/// A source that receives reports via a channel.
///
/// The producer sends `tracker.report()` whenever it likes; the overlay
/// only ever sees the latest one.
///
/// # Example
///
/// ```
/// use uxlatency_overlay::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("demo");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Report>,
    description: String,
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source from a watch receiver.
    pub fn new(receiver: watch::Receiver<Report>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            initial_returned: false,
        }
    }

    /// Create a channel pair for sending reports to a ChannelSource.
    ///
    /// The channel starts out holding an empty report.
    pub fn create(source_description: &str) -> (watch::Sender<Report>, Self) {
        let (tx, rx) = watch::channel(Report::default());
        (tx, Self::new(rx, source_description))
    }
}

impl ReportSource for ChannelSource {
    fn poll(&mut self) -> Option<Report> {
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        // Unseen values survive the sender being dropped.
        if self.receiver.borrow().has_changed() {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }

    fn refresh(&mut self) {
        self.receiver.mark_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uxlatency_sdk::{ManualClock, Tracker};
    use uxlatency_types::Timestamp;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");
        assert_eq!(source.description(), "channel: test");

        // Initially returns the empty report
        assert!(source.poll().unwrap().is_empty());
        assert!(source.poll().is_none());

        let tracker = Tracker::builder()
            .clock(ManualClock::new(Timestamp::from_millis(10)))
            .build();
        tracker.record_start("card");
        tx.send(tracker.report()).unwrap();

        let report = source.poll().unwrap();
        assert_eq!(report.len(), 1);
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_channel_source_keeps_final_report_after_sender_drop() {
        let (tx, mut source) = ChannelSource::create("test");
        assert!(source.poll().is_some());

        let tracker = Tracker::builder()
            .clock(ManualClock::new(Timestamp::from_millis(10)))
            .build();
        tracker.record_start("card");
        tx.send(tracker.report()).unwrap();
        drop(tx);

        let report = source.poll().unwrap();
        assert_eq!(report.len(), 1);
        assert!(source.poll().is_none());

        source.refresh();
        assert_eq!(source.poll().unwrap().len(), 1);
    }

    #[test]
    fn test_channel_source_refresh() {
        let (_tx, mut source) = ChannelSource::create("test");
        assert!(source.poll().is_some());
        assert!(source.poll().is_none());

        source.refresh();
        assert!(source.poll().is_some());
    }
}
