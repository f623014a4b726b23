//! Duration helpers shared by reports and displays.

use alloc::format;
use alloc::string::String;
use core::time::Duration;

/// Format a latency the way the overlay shows it, e.g. `0.212 sec`.
///
/// An absent latency is shown as zero.
pub fn format_latency(latency: Option<Duration>) -> String {
    format!("{:.3} sec", latency.unwrap_or(Duration::ZERO).as_secs_f64())
}

/// Serde adapter storing a `Duration` as integer microseconds.
#[cfg(feature = "serde")]
pub mod micros {
    use core::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_micros() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_micros)
    }
}
