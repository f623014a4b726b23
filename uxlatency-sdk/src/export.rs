//! Delimited (CSV) export of interaction records.
//!
//! ```text
//! id,type,start,feedback,latency
//! checkout,tap,1703160000.5,1703160000.712,0.212
//! ```
//!
//! `start` and `feedback` are Unix epoch seconds, `latency` is seconds.
//! Open records are written with `feedback` and `latency` set to `0`.

use std::borrow::Cow;

use uxlatency_types::{InteractionRecord, DEFAULT_INTERACTION_TYPE};

/// Header row of the export.
pub const HEADER: &str = "id,type,start,feedback,latency";

/// Render records as newline-terminated CSV rows, header first.
pub fn to_delimited(records: &[InteractionRecord]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + records.len() * 48);
    out.push_str(HEADER);
    out.push('\n');

    for record in records {
        let feedback = record.feedback.map_or(0.0, |f| f.as_secs_f64());
        let latency = record.latency().map_or(0.0, |l| l.as_secs_f64());
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            escape_field(&record.id),
            DEFAULT_INTERACTION_TYPE,
            record.start.as_secs_f64(),
            feedback,
            latency
        ));
    }

    out
}

/// Quote a field containing a comma, quote or line break; double inner quotes.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
