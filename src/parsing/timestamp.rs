//! Timestamp normalization for KakaoTalk date and time labels.
//!
//! Both dialects write dates as `2024년 1월 15일` (year/month/day unit words,
//! optional whitespace) and times as a 12-hour clock preceded by a meridiem
//! marker: `오전 9:05` (morning) or `오후 12:30` (afternoon).
//!
//! Normalization either yields a complete instant or nothing; callers drop
//! the message on `None` and never substitute a default.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)년\s*(\d+)월\s*(\d+)일").expect("Invalid date regex")
});

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(오전|오후)\s*(\d+):(\d+)").expect("Invalid time regex")
});

/// Morning/afternoon marker preceding a 12-hour clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    /// `오전`
    Morning,
    /// `오후`
    Afternoon,
}

impl Meridiem {
    /// Recognizes a marker word.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "오전" => Some(Meridiem::Morning),
            "오후" => Some(Meridiem::Afternoon),
            _ => None,
        }
    }

    /// Returns the marker word as written in exports.
    pub fn marker(self) -> &'static str {
        match self {
            Meridiem::Morning => "오전",
            Meridiem::Afternoon => "오후",
        }
    }

    /// Converts a 12-hour clock hour to a 24-hour one.
    ///
    /// Afternoon adds 12 unless the hour is already 12; morning 12 becomes 0.
    /// Hours above 12 are not on a 12-hour clock and yield `None`.
    pub fn to_24_hour(self, hour: u32) -> Option<u32> {
        match (self, hour) {
            (_, h) if h > 12 => None,
            (Meridiem::Afternoon, 12) => Some(12),
            (Meridiem::Afternoon, h) => Some(h + 12),
            (Meridiem::Morning, 12) => Some(0),
            (Meridiem::Morning, h) => Some(h),
        }
    }
}

/// Parses a `<year>년 <month>월 <day>일` label into a calendar date.
///
/// The pattern may appear anywhere in the input (weekday words or the time
/// may follow). Impossible dates such as `2월 30일` yield `None`.
pub fn parse_source_date(date: &str) -> Option<NaiveDate> {
    let caps = DATE_PATTERN.captures(date)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a `<marker> <hour>:<minute>` label into a time of day.
pub fn parse_source_time(time: &str) -> Option<NaiveTime> {
    let caps = TIME_PATTERN.captures(time)?;
    let meridiem = Meridiem::from_marker(&caps[1])?;
    let hour: u32 = caps[2].parse().ok()?;
    let minute: u32 = caps[3].parse().ok()?;
    NaiveTime::from_hms_opt(meridiem.to_24_hour(hour)?, minute, 0)
}

/// Converts a (date label, time label) pair into an instant.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use talkstats::parsing::normalize_timestamp;
///
/// let ts = normalize_timestamp("2024년 1월 15일", "오후 3:07").unwrap();
/// assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 15, 15, 7, 0).unwrap());
///
/// assert!(normalize_timestamp("2024-01-15", "오후 3:07").is_none());
/// ```
pub fn normalize_timestamp(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let date = parse_source_date(date)?;
    let time = parse_source_time(time)?;
    Some(date.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_meridiem_conversion() {
        assert_eq!(Meridiem::Afternoon.to_24_hour(1), Some(13));
        assert_eq!(Meridiem::Afternoon.to_24_hour(11), Some(23));
        assert_eq!(Meridiem::Afternoon.to_24_hour(12), Some(12));
        assert_eq!(Meridiem::Morning.to_24_hour(12), Some(0));
        assert_eq!(Meridiem::Morning.to_24_hour(1), Some(1));
        assert_eq!(Meridiem::Morning.to_24_hour(11), Some(11));
    }

    #[test]
    fn test_meridiem_rejects_hours_past_twelve() {
        assert_eq!(Meridiem::Morning.to_24_hour(13), None);
        assert_eq!(Meridiem::Afternoon.to_24_hour(13), None);
        assert_eq!(Meridiem::Afternoon.to_24_hour(u32::MAX), None);
        assert_eq!(Meridiem::Morning.to_24_hour(u32::MAX), None);
    }

    #[test]
    fn test_meridiem_markers() {
        assert_eq!(Meridiem::from_marker("오전"), Some(Meridiem::Morning));
        assert_eq!(Meridiem::from_marker("오후"), Some(Meridiem::Afternoon));
        assert_eq!(Meridiem::from_marker("AM"), None);
        assert_eq!(Meridiem::Afternoon.marker(), "오후");
    }

    #[test]
    fn test_parse_source_date_spacing() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(parse_source_date("2024년 1월 1일"), Some(expected));
        assert_eq!(parse_source_date("2024년1월1일"), Some(expected));
        assert_eq!(parse_source_date("2024년 01월 01일 월요일"), Some(expected));
    }

    #[test]
    fn test_parse_source_date_invalid() {
        assert_eq!(parse_source_date("2024-01-01"), None);
        assert_eq!(parse_source_date("2024년 2월 30일"), None);
        assert_eq!(parse_source_date("2024년 13월 1일"), None);
    }

    #[test]
    fn test_parse_source_time() {
        assert_eq!(parse_source_time("오전 12:05").unwrap().hour(), 0);
        assert_eq!(parse_source_time("오후 12:05").unwrap().hour(), 12);
        assert_eq!(parse_source_time("오후3:05").unwrap().hour(), 15);
        assert_eq!(parse_source_time("오전 9:59").unwrap().minute(), 59);
    }

    #[test]
    fn test_parse_source_time_invalid() {
        assert!(parse_source_time("3:05 PM").is_none());
        assert!(parse_source_time("오후 3시").is_none());
        assert!(parse_source_time("오전 9:75").is_none());
        assert!(parse_source_time("오후 13:00").is_none());
        assert!(parse_source_time("오전 13:00").is_none());
        assert!(parse_source_time("오전 99:00").is_none());
    }

    #[test]
    fn test_parse_source_time_huge_hour() {
        assert!(parse_source_time("오후 4294967290:00").is_none());
        assert!(parse_source_time("오전 4294967295:00").is_none());
        // Does not fit in u32 at all
        assert!(parse_source_time("오후 99999999999:00").is_none());
        assert!(normalize_timestamp("2024년 1월 1일", "오후 4294967290:00").is_none());
    }

    #[test]
    fn test_normalize_timestamp() {
        let ts = normalize_timestamp("2024년1월1일", "오전 10:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_normalize_requires_both_parts() {
        assert!(normalize_timestamp("2024년 1월 1일", "").is_none());
        assert!(normalize_timestamp("", "오전 10:00").is_none());
    }
}
