//! Session-level analysis entry point.
//!
//! A [`ChatAnalyzer`] parses an export once and keeps the message list
//! immutable. Every call to [`analyze`](ChatAnalyzer::analyze) filters that
//! list, runs the full statistics pipeline on the window, and returns a
//! fresh [`AnalysisResult`]; nothing carries over between calls.
//!
//! # Example
//!
//! ```rust
//! use talkstats::analyzer::ChatAnalyzer;
//! use talkstats::core::filter::FilterOptions;
//!
//! # fn main() -> talkstats::Result<()> {
//! let analyzer = ChatAnalyzer::from_text(
//!     "2024년1월1일 오전10:00, 철수 : 안녕\n2024년1월2일 오전10:01, 영희 : 안녕하세요",
//! );
//!
//! let everything = analyzer.analyze(&FilterOptions::new());
//! assert_eq!(everything.stats.total_messages, 2);
//!
//! let second_day = analyzer.analyze(&FilterOptions::new().with_date_from("2024-01-02")?);
//! assert_eq!(second_day.stats.total_messages, 1);
//!
//! // The overall range ignores the window
//! assert_eq!(second_day.date_range, everything.date_range);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::config::AnalysisConfig;
use crate::core::filter::{FilterOptions, apply_filters};
use crate::core::stats::Statistics;
use crate::error::Result;
use crate::parser::{Dialect, create_parser, detect_dialect, read_export};

/// Earliest and latest timestamp of a message list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub min: DateTime<Utc>,
    pub max: DateTime<Utc>,
}

impl DateRange {
    /// Range of `messages`, or `None` when empty.
    pub fn of(messages: &[Message]) -> Option<Self> {
        let min = messages.iter().map(Message::timestamp).min()?;
        let max = messages.iter().map(Message::timestamp).max()?;
        Some(Self { min, max })
    }

    /// Returns `true` if `at` lies inside the range (inclusive).
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.min <= at && at <= self.max
    }
}

/// Output of one analysis run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult<'a> {
    /// Statistics for the filtered window.
    pub stats: Statistics,

    /// The full, unfiltered message list.
    pub all_messages: &'a [Message],

    /// Range of the unfiltered list.
    pub date_range: Option<DateRange>,
}

impl AnalysisResult<'_> {
    /// Statistics and overall range, without the message list.
    pub fn report(&self) -> AnalysisReport<'_> {
        AnalysisReport {
            stats: &self.stats,
            date_range: self.date_range,
        }
    }
}

/// Serializable report view: the statistics fields at the top level plus
/// `dateRange`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport<'a> {
    #[serde(flatten)]
    pub stats: &'a Statistics,

    pub date_range: Option<DateRange>,
}

/// Parsed transcript plus analysis configuration.
#[derive(Debug, Clone)]
pub struct ChatAnalyzer {
    messages: Vec<Message>,
    dialect: Option<Dialect>,
    date_range: Option<DateRange>,
    config: AnalysisConfig,
}

impl ChatAnalyzer {
    /// Detects the dialect of `content` and parses it.
    pub fn from_text(content: &str) -> Self {
        let dialect = detect_dialect(content);
        tracing::debug!(%dialect, "detected transcript dialect");
        Self::parse_as(content, dialect)
    }

    /// Parses `content` with an explicit dialect.
    pub fn parse_as(content: &str, dialect: Dialect) -> Self {
        let messages = create_parser(dialect).parse_str(content);
        let mut analyzer = Self::from_messages(messages);
        analyzer.dialect = Some(dialect);
        analyzer
    }

    /// Reads and parses an export file.
    ///
    /// With `dialect` set to `None` the dialect is detected from the content.
    ///
    /// # Errors
    ///
    /// Returns [`TalkstatsError::Io`](crate::TalkstatsError::Io) if the file
    /// cannot be read and [`TalkstatsError::Utf8`](crate::TalkstatsError::Utf8)
    /// if it is not valid UTF-8.
    pub fn from_path(path: impl AsRef<Path>, dialect: Option<Dialect>) -> Result<Self> {
        let content = read_export(path.as_ref())?;
        Ok(match dialect {
            Some(dialect) => Self::parse_as(&content, dialect),
            None => Self::from_text(&content),
        })
    }

    /// Wraps already-parsed messages.
    ///
    /// Messages are put into chronological order; messages sharing a
    /// timestamp keep their relative order.
    pub fn from_messages(mut messages: Vec<Message>) -> Self {
        messages.sort_by_key(Message::timestamp);
        let date_range = DateRange::of(&messages);
        Self {
            messages,
            dialect: None,
            date_range,
            config: AnalysisConfig::default(),
        }
    }

    /// Replaces the analysis configuration.
    #[must_use]
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// All parsed messages in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Dialect the messages were parsed with, if parsed from text.
    pub fn dialect(&self) -> Option<Dialect> {
        self.dialect
    }

    /// Range of the unfiltered message list.
    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Number of parsed messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing was parsed.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Runs the statistics pipeline over the window selected by `options`.
    ///
    /// Keywords fall back to the configured defaults when `options` supplies
    /// none or an empty list.
    pub fn analyze(&self, options: &FilterOptions) -> AnalysisResult<'_> {
        let window = apply_filters(&self.messages, options);
        let keywords = options.effective_keywords(&self.config.default_keywords);
        let stats = Statistics::compute(&window, keywords, &self.config);

        AnalysisResult {
            stats,
            all_messages: &self.messages,
            date_range: self.date_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const LEGACY: &str = "2024년1월1일 오전10:00, 철수 : 안녕\n2024년1월1일 오전10:01, 영희 : 안녕하세요";

    #[test]
    fn test_from_text_detects_dialect() {
        let analyzer = ChatAnalyzer::from_text(LEGACY);
        assert_eq!(analyzer.dialect(), Some(Dialect::Legacy));
        assert_eq!(analyzer.len(), 2);

        let mobile = ChatAnalyzer::from_text("--- 2024년 1월 1일 월요일 ---\n[철수] [오전 9:00] hi");
        assert_eq!(mobile.dialect(), Some(Dialect::Mobile));
        assert_eq!(mobile.len(), 1);
    }

    #[test]
    fn test_from_messages_sorts_stably() {
        let t = |h| Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap();
        let analyzer = ChatAnalyzer::from_messages(vec![
            Message::new("c", "late", t(12)),
            Message::new("a", "first", t(9)),
            Message::new("b", "second", t(9)),
        ]);
        let names: Vec<&str> = analyzer.messages().iter().map(Message::name).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(
            analyzer.date_range(),
            Some(DateRange {
                min: t(9),
                max: t(12)
            })
        );
    }

    #[test]
    fn test_analyze_two_messages() {
        let analyzer = ChatAnalyzer::from_text(LEGACY);
        let result = analyzer.analyze(&FilterOptions::new());

        assert_eq!(result.stats.total_messages, 2);
        assert_eq!(result.stats.total_participants, 2);
        assert_eq!(result.all_messages.len(), 2);
        assert_eq!(result.stats.conversation_starters.len(), 1);
        assert_eq!(result.stats.conversation_starters[0].name, "철수");
    }

    #[test]
    fn test_default_keywords_used_when_empty() {
        let analyzer = ChatAnalyzer::from_text("2024년1월1일 오후8:00, 철수 : 오늘 술 한잔");
        let options = FilterOptions::new().with_keywords(Vec::<String>::new());
        let result = analyzer.analyze(&options);
        assert!(result.stats.keyword_mentions.contains_key("술"));

        let custom = analyzer.analyze(&FilterOptions::new().with_keywords(["한잔"]));
        assert!(custom.stats.keyword_mentions.contains_key("한잔"));
        assert!(!custom.stats.keyword_mentions.contains_key("술"));
    }

    #[test]
    fn test_window_does_not_change_date_range() {
        let analyzer = ChatAnalyzer::from_text(LEGACY);
        let options = FilterOptions::new().with_date_from("2030-01-01").unwrap();
        let result = analyzer.analyze(&options);

        assert_eq!(result.stats.total_messages, 0);
        assert_eq!(result.all_messages.len(), 2);
        assert_eq!(result.date_range, analyzer.date_range());
    }

    #[test]
    fn test_empty_transcript() {
        let analyzer = ChatAnalyzer::from_text("");
        assert!(analyzer.is_empty());
        assert_eq!(analyzer.date_range(), None);
        let result = analyzer.analyze(&FilterOptions::new());
        assert_eq!(result.stats.total_messages, 0);
    }

    #[test]
    fn test_custom_config() {
        let analyzer = ChatAnalyzer::from_text(LEGACY)
            .with_config(AnalysisConfig::new().with_ranking_limit(1));
        let result = analyzer.analyze(&FilterOptions::new());
        assert_eq!(result.stats.top_participants.len(), 1);
    }

    #[test]
    fn test_from_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), LEGACY).unwrap();

        let analyzer = ChatAnalyzer::from_path(file.path(), None).unwrap();
        assert_eq!(analyzer.len(), 2);

        let forced = ChatAnalyzer::from_path(file.path(), Some(Dialect::Mobile)).unwrap();
        assert!(forced.is_empty());

        assert!(ChatAnalyzer::from_path("/no/such/export.txt", None).unwrap_err().is_io());
    }

    #[test]
    fn test_result_serializes() {
        let analyzer = ChatAnalyzer::from_text(LEGACY);
        let json = serde_json::to_value(analyzer.analyze(&FilterOptions::new())).unwrap();
        assert_eq!(json["stats"]["totalMessages"], 2);
        assert_eq!(json["allMessages"].as_array().unwrap().len(), 2);
        assert!(json["dateRange"]["min"].is_string());
    }

    #[test]
    fn test_report_view_flattens_stats() {
        let analyzer = ChatAnalyzer::from_text(LEGACY);
        let result = analyzer.analyze(&FilterOptions::new());
        let json = serde_json::to_value(result.report()).unwrap();
        assert_eq!(json["totalMessages"], 2);
        assert_eq!(json["dateRange"]["min"], "2024-01-01T10:00:00Z");
        assert_eq!(json["dateRange"]["max"], "2024-01-01T10:01:00Z");
        assert!(json.get("allMessages").is_none());

        let empty = ChatAnalyzer::from_text("");
        let json = serde_json::to_value(empty.analyze(&FilterOptions::new()).report()).unwrap();
        assert!(json["dateRange"].is_null());
    }
}
