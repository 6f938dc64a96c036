//! Normalized chat message.
//!
//! Both transcript dialects are converted into [`Message`]. Every message
//! carries a resolved [`timestamp`](Message::timestamp): a header whose date or
//! time cannot be normalized never becomes a `Message`, so downstream stages
//! never see a partial record.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use talkstats::Message;
//!
//! let ts = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
//! let msg = Message::new("철수", "안녕", ts)
//!     .with_source_labels("2024년 1월 1일", "오전 10:00")
//!     .with_full_name("철수/iPhone");
//!
//! assert_eq!(msg.name(), "철수");
//! assert_eq!(msg.full_name(), Some("철수/iPhone"));
//! assert_eq!(msg.hour(), 10);
//! ```

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// A single parsed transcript message.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `date` | `String` | Calendar date exactly as written in the export |
/// | `time` | `String` | Meridiem time, normalized to `"<marker> H:MM"` |
/// | `name` | `String` | Primary sender name |
/// | `full_name` | `Option<String>` | Raw sender field before device suffix removal |
/// | `body` | `String` | Message text, trimmed |
/// | `timestamp` | `DateTime<Utc>` | Wall-clock instant derived from `date` + `time` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Calendar date in source notation, e.g. `2024년 1월 1일`.
    pub date: String,

    /// Meridiem time in source notation, e.g. `오후 3:05`.
    pub time: String,

    /// Primary participant name.
    pub name: String,

    /// Raw sender field, including any `/device` annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub full_name: Option<String>,

    /// Message text.
    ///
    /// May contain embedded newlines for multi-line legacy messages.
    pub body: String,

    /// When the message was sent.
    ///
    /// Exports carry no zone information; the local wall-clock time is
    /// stored as-is in a UTC container so arithmetic stays zone-free.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a message with empty source labels and no `full_name`.
    pub fn new(name: impl Into<String>, body: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            date: String::new(),
            time: String::new(),
            name: name.into(),
            full_name: None,
            body: body.into(),
            timestamp,
        }
    }

    /// Builder method to set the source date and time labels.
    #[must_use]
    pub fn with_source_labels(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.date = date.into();
        self.time = time.into();
        self
    }

    /// Builder method to set the raw sender field.
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the primary sender name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw sender field, if recorded.
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Returns the message text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the message timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    // =========================================================================
    // Derived calendar fields
    // =========================================================================

    /// Calendar date of the message.
    pub fn calendar_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Hour of day, `0..=23`.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Day of week.
    pub fn weekday(&self) -> Weekday {
        self.timestamp.weekday()
    }

    /// Body length in Unicode scalar values.
    pub fn body_len(&self) -> usize {
        self.body.chars().count()
    }

    /// Returns `true` if the body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}
