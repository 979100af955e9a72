//! Data model for store events and stream metadata
//!
//! The wire format is an all-optional record; [`Event`] is the validated
//! in-memory form with the numeric/system-state split made structural.

mod event;
mod stream;

pub use event::{Event, QualityFlags, WireEvent};
pub use stream::Stream;

use chrono::{DateTime, SecondsFormat, Utc};

/// Render a timestamp in the invariant round-trip form the store parses,
/// independent of host locale.
pub fn roundtrip_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
