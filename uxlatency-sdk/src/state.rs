//! Interaction collection owned by a tracker.
//!
//! Everything here runs with the tracker's lock held. Methods never emit
//! signals themselves; they return the signals the operation produced so
//! the tracker can deliver them after releasing the lock.

use uxlatency_types::{InteractionRecord, Thresholds, Timestamp};

use crate::signal::Signal;

/// Records and thresholds behind a tracker's lock.
#[derive(Debug, Default)]
pub struct TrackerState {
    pub interactions: Vec<InteractionRecord>,
    pub thresholds: Thresholds,
}

impl TrackerState {
    /// Open a new interaction, discarding every earlier record with `id`.
    pub fn start(&mut self, id: &str, now: Timestamp) -> Vec<Signal> {
        let mut signals = Vec::with_capacity(2);

        if self.interactions.iter().any(|r| r.id == id && r.is_open()) {
            signals.push(Signal::DuplicateStart { id: id.to_string() });
        }

        self.interactions.retain(|r| r.id != id);
        self.interactions.push(InteractionRecord::open(id, now));

        signals.push(Signal::InteractionStarted { id: id.to_string() });
        signals
    }

    /// Close the most recent open interaction with `id`.
    ///
    /// With no open interaction this changes nothing and reports
    /// `FeedbackFailed`.
    pub fn feedback(&mut self, id: &str, now: Timestamp) -> Vec<Signal> {
        let Some(record) = self
            .interactions
            .iter_mut()
            .rev()
            .find(|r| r.id == id && r.is_open())
        else {
            return vec![Signal::FeedbackFailed { id: id.to_string() }];
        };

        record.feedback = Some(now);

        let mut signals = Vec::with_capacity(2);
        if now < record.start {
            signals.push(Signal::ClockSkew {
                id: id.to_string(),
                start: record.start,
                feedback: now,
            });
        }
        signals.push(Signal::FeedbackRecorded { id: id.to_string() });
        signals
    }

    /// The most recent record with `id`, open or closed.
    pub fn resolve(&self, id: &str) -> Option<&InteractionRecord> {
        self.interactions.iter().rev().find(|r| r.id == id)
    }

    /// Drop every record.
    pub fn clear(&mut self) -> Vec<Signal> {
        self.interactions.clear();
        vec![Signal::TrackerReset]
    }
}
