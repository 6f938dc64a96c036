//! Legacy (desktop) KakaoTalk export parser.
//!
//! Header format: `2024년 1월 15일 오후 3:07, 철수/iPhone : 본문`
//!
//! All headers are located first; a message body is the text between the
//! end of its header and the start of the next header (or end of input),
//! trimmed. Bodies may therefore span several lines, and any line without a
//! header (join notices, disclaimers) is absorbed into the preceding body or
//! ignored when it precedes the first header.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::Message;
use crate::parser::{Dialect, Parser};
use crate::parsing::normalize_timestamp;

/// `<date> <meridiem time>, <name> : `
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+년\s*\d+월\s*\d+일\s*(?:오전|오후)\s*\d+:\d+),\s*([^:\n]+?)\s*:\s*")
        .expect("Invalid legacy header regex")
});

/// Splits the header's date-time capture into date and time labels.
static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+년\s*\d+월\s*\d+일)\s*(오전|오후)\s*(\d+:\d+)")
        .expect("Invalid legacy date-time regex")
});

/// Parser for desktop KakaoTalk TXT exports.
///
/// # Example
///
/// ```rust
/// use talkstats::parser::Parser;
/// use talkstats::parsers::LegacyParser;
///
/// let export = "2024년1월1일 오전10:00, 철수 : 안녕\n2024년1월1일 오전10:01, 영희 : 안녕하세요";
/// let messages = LegacyParser::new().parse_str(export);
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[1].name, "영희");
/// assert_eq!(messages[1].body, "안녕하세요");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyParser;

impl LegacyParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }
}

/// Splits `철수/iPhone ` into the trimmed primary name and the trimmed raw field.
pub(crate) fn split_sender(raw: &str) -> (&str, &str) {
    let primary = raw.split('/').next().unwrap_or(raw).trim();
    (primary, raw.trim())
}

/// Builds a message from one header match and its body text.
fn build_message(header: &Captures<'_>, body: &str) -> Option<Message> {
    let date_time = header.get(1)?.as_str();
    let sender = header.get(2)?.as_str();

    let parts = DATE_TIME.captures(date_time)?;
    let date = parts.get(1)?.as_str();
    let time = format!("{} {}", &parts[2], &parts[3]);

    let Some(timestamp) = normalize_timestamp(date, &time) else {
        tracing::trace!(date, time, "dropping legacy header with invalid timestamp");
        return None;
    };

    let (name, full_name) = split_sender(sender);

    Some(
        Message::new(name, body.trim(), timestamp)
            .with_source_labels(date, time)
            .with_full_name(full_name),
    )
}

impl Parser for LegacyParser {
    fn name(&self) -> &'static str {
        "KakaoTalk Legacy"
    }

    fn dialect(&self) -> Dialect {
        Dialect::Legacy
    }

    fn parse_str(&self, content: &str) -> Vec<Message> {
        let headers: Vec<Captures<'_>> = HEADER.captures_iter(content).collect();

        let mut messages = Vec::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let Some(whole) = header.get(0) else {
                continue;
            };
            let body_end = headers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(content.len(), |next| next.start());

            if let Some(msg) = build_message(header, &content[whole.end()..body_end]) {
                messages.push(msg);
            }
        }

        tracing::debug!(
            headers = headers.len(),
            parsed = messages.len(),
            "parsed legacy transcript"
        );
        messages
    }
}
