//! Writers for reports and message exports.
//!
//! - [`write_json`] / [`to_json`] - pretty JSON of any serializable value
//!   (the statistics report or a message list) - requires `json-output`
//! - [`write_jsonl`] / [`to_jsonl`] - one message per line - requires `json-output`
//! - [`write_csv`] / [`to_csv`] - messages with `;` delimiter - requires `csv-output`
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> talkstats::Result<()> {
//! use talkstats::analyzer::ChatAnalyzer;
//! use talkstats::core::filter::FilterOptions;
//! use talkstats::core::output::{write_csv, write_json};
//!
//! let analyzer = ChatAnalyzer::from_path("KakaoTalk_Chat.txt", None)?;
//! let result = analyzer.analyze(&FilterOptions::new());
//!
//! write_json(&result.stats, "report.json")?;
//! write_csv(analyzer.messages(), "messages.csv")?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

/// Timestamp layout of the CSV `Timestamp` column.
#[cfg(feature = "csv-output")]
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
