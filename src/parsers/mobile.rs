//! Mobile KakaoTalk export parser.
//!
//! Mobile exports are line-oriented:
//!
//! ```text
//! --------------- 2024년 1월 15일 월요일 ---------------
//! [철수] [오후 3:07] 안녕
//! [영희] [오후 3:08] 반가워
//! ```
//!
//! Each message takes its date from the nearest preceding marker line.
//! Messages before the first marker, and lines matching neither shape,
//! are dropped.

use std::sync::LazyLock;

use regex::Regex;

use crate::Message;
use crate::parser::{Dialect, Parser};
use crate::parsing::normalize_timestamp;

static DATE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-+\s*(\d+년\s*\d+월\s*\d+일)\s*\S+\s*-+$").expect("Invalid date marker regex")
});

static MESSAGE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(.+?)\]\s*\[(오전|오후)\s*(\d+:\d+)\]\s*(.*)$")
        .expect("Invalid mobile message regex")
});

/// Parser for mobile KakaoTalk TXT exports.
///
/// # Example
///
/// ```rust
/// use talkstats::parser::Parser;
/// use talkstats::parsers::MobileParser;
///
/// let export = "--------------- 2024년 1월 1일 월요일 ---------------\n\
///               [철수] [오전 9:00] 안녕";
/// let messages = MobileParser::new().parse_str(export);
///
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].time, "오전 9:00");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MobileParser;

impl MobileParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }
}

/// Returns the date label of a marker line, if `line` is one.
pub(crate) fn marker_date(line: &str) -> Option<&str> {
    DATE_MARKER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

impl Parser for MobileParser {
    fn name(&self) -> &'static str {
        "KakaoTalk Mobile"
    }

    fn dialect(&self) -> Dialect {
        Dialect::Mobile
    }

    fn parse_str(&self, content: &str) -> Vec<Message> {
        let mut messages = Vec::new();
        let mut current_date: Option<&str> = None;
        let mut dropped = 0usize;

        for line in content.lines().map(str::trim) {
            if let Some(date) = marker_date(line) {
                current_date = Some(date);
                continue;
            }

            let Some(caps) = MESSAGE_LINE.captures(line) else {
                continue;
            };

            let Some(date) = current_date else {
                tracing::trace!(line, "dropping mobile message before first date marker");
                dropped += 1;
                continue;
            };

            let name = caps[1].trim();
            let time = format!("{} {}", &caps[2], &caps[3]);
            let body = caps[4].trim();

            let Some(timestamp) = normalize_timestamp(date, &time) else {
                tracing::trace!(date, time, "dropping mobile message with invalid timestamp");
                dropped += 1;
                continue;
            };

            messages.push(
                Message::new(name, body, timestamp)
                    .with_source_labels(date, time)
                    .with_full_name(name),
            );
        }

        tracing::debug!(
            parsed = messages.len(),
            dropped,
            "parsed mobile transcript"
        );
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const MARKER_JAN_1: &str = "--------------- 2024년 1월 1일 월요일 ---------------";
    const MARKER_JAN_2: &str = "--------------- 2024년 1월 2일 화요일 ---------------";

    fn parse(content: &str) -> Vec<Message> {
        MobileParser::new().parse_str(content)
    }

    #[test]
    fn test_parser_name() {
        let parser = MobileParser::new();
        assert_eq!(Parser::name(&parser), "KakaoTalk Mobile");
        assert_eq!(parser.dialect(), Dialect::Mobile);
    }

    #[test]
    fn test_marker_date() {
        assert_eq!(marker_date(MARKER_JAN_1), Some("2024년 1월 1일"));
        assert_eq!(marker_date("-- 2024년1월1일 월요일 --"), Some("2024년1월1일"));
        assert_eq!(marker_date("[철수] [오전 9:00] hi"), None);
        assert_eq!(marker_date("2024년 1월 1일 월요일"), None);
    }

    #[test]
    fn test_parse_single_message() {
        let content = format!("{MARKER_JAN_1}\n[철수] [오전 9:00] 안녕");
        let messages = parse(&content);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].name, "철수");
        assert_eq!(messages[0].full_name.as_deref(), Some("철수"));
        assert_eq!(messages[0].date, "2024년 1월 1일");
        assert_eq!(messages[0].time, "오전 9:00");
        assert_eq!(messages[0].body, "안녕");
        assert_eq!(
            messages[0].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_nearest_preceding_marker() {
        let content = format!(
            "{MARKER_JAN_1}\n[철수] [오후 11:59] 잘자\n{MARKER_JAN_2}\n[영희] [오전 12:01] 굿모닝"
        );
        let messages = parse(&content);
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 0).unwrap()
        );
        assert_eq!(
            messages[1].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 1, 0).unwrap()
        );
    }

    #[test]
    fn test_message_before_marker_is_dropped() {
        let content = format!("[철수] [오전 9:00] 고아\n{MARKER_JAN_1}\n[영희] [오전 9:01] 정상");
        let messages = parse(&content);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].name, "영희");
    }

    #[test]
    fn test_continuation_lines_are_ignored() {
        let content = format!("{MARKER_JAN_1}\n[철수] [오전 9:00] 첫 줄\n둘째 줄\n[영희] [오전 9:01] ok");
        let messages = parse(&content);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].body, "첫 줄");
    }

    #[test]
    fn test_indented_lines_and_crlf() {
        let content = format!("  {MARKER_JAN_1}  \r\n   [철수]  [오후 1:30]   hi  \r\n");
        let messages = parse(&content);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].body, "hi");
        assert_eq!(messages[0].time, "오후 1:30");
    }

    #[test]
    fn test_empty_body() {
        let content = format!("{MARKER_JAN_1}\n[철수] [오전 9:00]");
        let messages = parse(&content);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].body.is_empty());
    }

    #[test]
    fn test_invalid_marker_date_drops_messages() {
        let content = "--- 2024년 2월 30일 금요일 ---\n[철수] [오전 9:00] 유령";
        assert!(parse(content).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }
}
