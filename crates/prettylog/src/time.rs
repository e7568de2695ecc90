//! String timestamp parsing against the supported layout table.
//!
//! A timestamp-bearing key whose string value matches none of these layouts
//! is unrecoverably ambiguous: the whole line fails rather than guessing.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Layouts carrying an explicit UTC offset.
const ZONED_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Layouts without zone information, taken as UTC.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    // asctime, e.g. "Mon Jan  2 15:04:05 2006"
    "%a %b %e %H:%M:%S %Y",
];

/// Try each supported layout in turn. `None` means the string matched no
/// known layout.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_rfc2822(s) {
        return Some(t.with_timezone(&Utc));
    }
    for layout in ZONED_LAYOUTS {
        if let Ok(t) = DateTime::parse_from_str(s, layout) {
            return Some(t.with_timezone(&Utc));
        }
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(t.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_round_trips() {
        let parsed = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_rfc3339_fractional_seconds() {
        let parsed = parse_timestamp("2024-01-01T12:30:45.123456789Z").unwrap();
        assert_eq!(parsed.timestamp_subsec_micros(), 123_456);
    }

    #[test]
    fn test_rfc2822() {
        let parsed = parse_timestamp("Mon, 01 Jan 2024 00:00:00 +0000").unwrap();
        assert_eq!(parsed.timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_naive_layouts_assume_utc() {
        let space = parse_timestamp("2024-01-01 00:00:00").unwrap();
        let t_sep = parse_timestamp("2024-01-01T00:00:00").unwrap();
        let slash = parse_timestamp("2024/01/01 00:00:00").unwrap();
        assert_eq!(space.timestamp(), 1_704_067_200);
        assert_eq!(space, t_sep);
        assert_eq!(space, slash);
    }

    #[test]
    fn test_zoned_layout_with_offset() {
        let parsed = parse_timestamp("2024-01-01 05:30:00 +0530").unwrap();
        assert_eq!(parsed.timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_asctime() {
        let parsed = parse_timestamp("Mon Jan  1 00:00:00 2024").unwrap();
        assert_eq!(parsed.timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_unknown_layouts_rejected() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("01/02/2024").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
