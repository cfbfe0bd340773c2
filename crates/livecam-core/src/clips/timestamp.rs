//! Timestamps embedded in clip object keys.
//!
//! Recorders name clips `{prefix}/streams/{YYYY-MM-DD}/{YYYY-MM-DD_HH-MM-SS}-{angle}.mp4`.
//! The token is fixed-width and zero-padded, so comparing two tokens as strings
//! gives the same answer as comparing them as instants.

use chrono::NaiveDateTime;
use regex::Regex;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::LazyLock;

use crate::error::AppError;

/// `chrono` format of the timestamp token.
pub const CLIP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// `chrono` format of the per-day directory segment.
pub const CLIP_DATE_FORMAT: &str = "%Y-%m-%d";

static CLIP_TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2}").expect("clip timestamp pattern is valid")
});

/// A `YYYY-MM-DD_HH-MM-SS` token.
///
/// Ordering is plain string ordering. Only construct values through
/// [`extract_timestamp`] or [`ClipTimestamp::from_naive`]; any other width
/// would break the string/chronological equivalence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClipTimestamp(String);

impl ClipTimestamp {
    /// Formats a wall-clock time in the key format.
    pub fn from_naive(at: &NaiveDateTime) -> Self {
        ClipTimestamp(at.format(CLIP_TIMESTAMP_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar value of the token, or `None` for tokens like `2024-13-40_99-00-00`
    /// that match the pattern but not the calendar.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.0, CLIP_TIMESTAMP_FORMAT).ok()
    }
}

impl Display for ClipTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Returns the first timestamp token found in `key`.
pub fn extract_timestamp(key: &str) -> Result<ClipTimestamp, AppError> {
    CLIP_TIMESTAMP_RE
        .find(key)
        .map(|m| ClipTimestamp(m.as_str().to_string()))
        .ok_or_else(|| AppError::MalformedKey(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_extract_from_full_key() {
        let ts = extract_timestamp("cams/streams/2024-01-01/2024-01-01_10-00-00-front.mp4").unwrap();
        assert_eq!(ts.as_str(), "2024-01-01_10-00-00");
    }

    #[test]
    fn test_extract_takes_first_match() {
        let ts = extract_timestamp("x/2024-01-01_10-00-00/2023-05-05_01-02-03-back.mp4").unwrap();
        assert_eq!(ts.as_str(), "2024-01-01_10-00-00");
    }

    #[test]
    fn test_date_directory_alone_is_malformed() {
        let err = extract_timestamp("cams/streams/2024-01-01/front.mp4").unwrap_err();
        assert!(matches!(err, AppError::MalformedKey(ref k) if k == "cams/streams/2024-01-01/front.mp4"));
    }

    #[test]
    fn test_unpadded_token_is_malformed() {
        assert!(extract_timestamp("cams/2024-1-01_10-00-00-front.mp4").is_err());
        assert!(extract_timestamp("cams/2024-01-01_9-00-00-front.mp4").is_err());
    }

    #[test]
    fn test_string_order_matches_chronological_order() {
        let stamps = [
            "2023-12-31_23-59-59",
            "2024-01-01_00-00-00",
            "2024-01-01_09-59-59",
            "2024-01-01_10-00-00",
            "2024-02-01_00-00-00",
            "2024-10-01_00-00-00",
        ];
        for pair in stamps.windows(2) {
            let a = extract_timestamp(pair[0]).unwrap();
            let b = extract_timestamp(pair[1]).unwrap();
            assert!(a < b, "{} should sort before {}", a, b);
            assert!(a.to_naive().unwrap() < b.to_naive().unwrap());
        }
    }

    #[test]
    fn test_from_naive_round_trip() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(4, 5, 6)
            .unwrap();
        let ts = ClipTimestamp::from_naive(&at);
        assert_eq!(ts.as_str(), "2024-03-07_04-05-06");
        assert_eq!(ts.to_naive(), Some(at));
    }

    #[test]
    fn test_out_of_calendar_token_has_no_instant() {
        let ts = extract_timestamp("cams/2024-13-40_99-00-00-left.mp4").unwrap();
        assert_eq!(ts.to_naive(), None);
    }
}
