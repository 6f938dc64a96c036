//! Per-call filter options.
//!
//! [`FilterOptions`] selects the date window of one analysis run and the
//! keywords it tracks. The window restricts which messages are analyzed; the
//! keywords only decide which per-keyword counters exist and never remove
//! messages.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterOptions::with_date_from) | Messages on or after the start of a day |
//! | Date to | [`with_date_to`](FilterOptions::with_date_to) | Messages on or before the end of a day |
//! | Start | [`with_start`](FilterOptions::with_start) | Messages at or after an instant |
//! | End | [`with_end`](FilterOptions::with_end) | Messages at or before an instant |
//! | Keywords | [`with_keywords`](FilterOptions::with_keywords) | Keywords to count |
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use talkstats::core::filter::{FilterOptions, apply_filters};
//! use talkstats::Message;
//!
//! # fn main() -> talkstats::Result<()> {
//! let messages = vec![
//!     Message::new("철수", "old", Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
//!     Message::new("영희", "new", Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()),
//! ];
//!
//! let options = FilterOptions::new()
//!     .with_date_from("2024-06-01")?
//!     .with_date_to("2024-12-31")?;
//!
//! let filtered = apply_filters(&messages, &options);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body, "new");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::{Result, TalkstatsError};

/// Date window and keyword set for one analysis run.
///
/// Both bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Include only messages at or after this instant.
    pub start: Option<DateTime<Utc>>,

    /// Include only messages at or before this instant.
    pub end: Option<DateTime<Utc>>,

    /// Keywords to count. `None` or an empty list selects the defaults.
    pub keywords: Option<Vec<String>>,
}

impl FilterOptions {
    /// Creates options with no window and default keywords.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start to the beginning of a `YYYY-MM-DD` day.
    ///
    /// # Errors
    ///
    /// Returns [`TalkstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.start = Some(parse_day(date_str)?.and_time(NaiveTime::MIN).and_utc());
        Ok(self)
    }

    /// Sets the end to the last second of a `YYYY-MM-DD` day.
    ///
    /// # Errors
    ///
    /// Returns [`TalkstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        let day = parse_day(date_str)?;
        let end_of_day = day
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| TalkstatsError::invalid_date(date_str))?;
        self.end = Some(end_of_day.and_utc());
        Ok(self)
    }

    /// Sets the start instant directly.
    #[must_use]
    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the end instant directly.
    #[must_use]
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the keywords to count.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    /// Returns `true` if a date bound is set.
    pub fn has_date_filter(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Returns `true` if `timestamp` lies inside the window.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| timestamp >= start)
            && self.end.is_none_or(|end| timestamp <= end)
    }

    /// Returns the caller's keywords, or `defaults` when none were given.
    pub fn effective_keywords<'a>(&'a self, defaults: &'a [String]) -> &'a [String] {
        match self.keywords.as_deref() {
            Some(keywords) if !keywords.is_empty() => keywords,
            _ => defaults,
        }
    }
}

fn parse_day(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| TalkstatsError::invalid_date(date_str))
}

/// Selects the messages inside the window, preserving order.
pub fn apply_filters<'a>(messages: &'a [Message], options: &FilterOptions) -> Vec<&'a Message> {
    let filtered: Vec<&Message> = messages
        .iter()
        .filter(|msg| options.contains(msg.timestamp))
        .collect();

    if options.has_date_filter() {
        tracing::debug!(
            total = messages.len(),
            kept = filtered.len(),
            "applied date window"
        );
    }
    filtered
}
