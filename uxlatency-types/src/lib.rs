//! # uxlatency-types
//!
//! Core types for measuring perceived UI latency. This crate defines the
//! interaction record, the threshold classifier and the statistics engine
//! shared by the instrumentation SDK and the overlay viewer.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Pure computations**: Classification and statistics never mutate their input
//! - **Derived latency**: Latency is recomputed from timestamps on every access
//! - **Versioned reports**: Reports include version info for forward compatibility
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: JSON/MessagePack/etc. serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use uxlatency_types::{stats, InteractionRecord, Thresholds, Tier, Timestamp};
//!
//! let records = vec![
//!     InteractionRecord::closed("fast", Timestamp::from_secs_f64(0.0), Timestamp::from_secs_f64(0.2)),
//!     InteractionRecord::closed("slow", Timestamp::from_secs_f64(1.0), Timestamp::from_secs_f64(2.5)),
//! ];
//!
//! let thresholds = Thresholds::default();
//! assert_eq!(records[0].tier(&thresholds), Tier::Green);
//! assert_eq!(records[1].tier(&thresholds), Tier::Red);
//!
//! let outliers = stats::outliers_above(&records, std::time::Duration::from_secs(1));
//! assert_eq!(outliers.len(), 1);
//! assert_eq!(outliers[0].id, "slow");
//! ```
//!
//! ## Schema Version
//!
//! The current schema version is **1**. The version is included in serialized
//! reports to allow consumers to handle format evolution gracefully.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod duration;
mod interaction;
#[cfg(feature = "std")]
mod report;
pub mod stats;
mod thresholds;
mod timestamp;
mod version;

pub use interaction::*;
#[cfg(feature = "std")]
pub use report::*;
pub use stats::StatsSummary;
pub use thresholds::*;
pub use timestamp::*;
pub use version::*;

/// Current schema version.
///
/// Increment this when making breaking changes to the report format.
/// Consumers should check this version and handle older formats appropriately.
pub const SCHEMA_VERSION: u32 = 1;

/// Interaction category reported for every record.
///
/// Records carry no type information, so every interaction is counted as a tap.
pub const DEFAULT_INTERACTION_TYPE: &str = "tap";
