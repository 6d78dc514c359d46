//! Timestamp normalization.
//!
//! Local files carry EXIF-style dates (`2019:06:19 15:02:27`) while the
//! remote listing reports `2019-06-19 15:02:27`. Both are reduced to a
//! [`CanonicalTimestamp`] so they can be compared as plain strings.

mod types;

pub use types::{CanonicalTimestamp, RawTimestamp, TimestampError, TimestampFormat};

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

static LOCAL_METADATA_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}):(\d{2}):(\d{2}) (\d{2}:\d{2}:\d{2})$")
        .expect("local metadata pattern should compile")
});

const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Normalize a raw timestamp into its canonical form.
///
/// Local metadata timestamps are validated before their date separators are
/// rewritten. Remote timestamps are already canonical and pass through.
pub fn normalize(
    raw: &RawTimestamp,
    format: TimestampFormat,
) -> Result<CanonicalTimestamp, TimestampError> {
    match format {
        TimestampFormat::LocalMetadata => normalize_local(raw.as_str()),
        TimestampFormat::Remote => Ok(normalize_remote(raw)),
    }
}

/// Remote timestamps are canonical as delivered, so this cannot fail.
pub fn normalize_remote(raw: &RawTimestamp) -> CanonicalTimestamp {
    CanonicalTimestamp::new_unchecked(raw.as_str().to_string())
}

fn normalize_local(raw: &str) -> Result<CanonicalTimestamp, TimestampError> {
    let malformed = || TimestampError::Malformed(raw.to_string());

    let caps = LOCAL_METADATA_PATTERN.captures(raw).ok_or_else(malformed)?;
    let canonical = format!("{}-{}-{} {}", &caps[1], &caps[2], &caps[3], &caps[4]);

    // Shape alone lets through unset EXIF dates like 0000:00:00.
    NaiveDateTime::parse_from_str(&canonical, CANONICAL_FORMAT).map_err(|_| malformed())?;

    Ok(CanonicalTimestamp::new_unchecked(canonical))
}
