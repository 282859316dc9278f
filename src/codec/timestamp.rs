//! Timestamp text profile
//!
//! All timestamps cross the wire as RFC 3339 text. Fractional seconds are
//! written only when non-zero. The offset of a value read from the wire is
//! kept, so it is written back the way it arrived.

use chrono::{DateTime, FixedOffset, SecondsFormat};

/// Format a timestamp using the wire profile
pub fn format(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse a timestamp using the wire profile
pub fn parse(text: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text)
}
