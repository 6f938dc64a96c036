//! # talkstats
//!
//! Parse KakaoTalk chat exports and compute participation, timing and
//! conversation statistics.
//!
//! ## Overview
//!
//! talkstats understands both export dialects:
//! - **Legacy** (desktop) - `2024년 1월 1일 오전 10:00, 철수 : 안녕`, bodies may
//!   span several lines
//! - **Mobile** - `--- 2024년 1월 1일 월요일 ---` date markers followed by
//!   `[철수] [오전 10:00] 안녕` lines
//!
//! Malformed headers and notice lines are skipped. The parsed list is kept
//! immutable; each analysis filters it by date window and computes the
//! full [`Statistics`](core::Statistics) bundle again.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use talkstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let analyzer = ChatAnalyzer::from_path("KakaoTalk_Chat.txt", None)?;
//!
//!     let options = FilterOptions::new()
//!         .with_date_from("2024-01-01")?
//!         .with_keywords(["술", "맛집"]);
//!     let result = analyzer.analyze(&options);
//!
//!     for entry in &result.stats.top_participants {
//!         println!("{}: {}", entry.name, entry.count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`analyzer`] - [`ChatAnalyzer`](analyzer::ChatAnalyzer) session holder and
//!   [`AnalysisResult`](analyzer::AnalysisResult)
//! - [`parser`] - [`Dialect`](parser::Dialect), detection and the
//!   [`Parser`](parser::Parser) trait
//! - [`parsers`] - [`LegacyParser`](parsers::LegacyParser),
//!   [`MobileParser`](parsers::MobileParser)
//! - [`parsing`] - Source date/time normalization
//! - [`core`] - Filtering, aggregation, session heuristics, rankings, output
//! - [`config`] - [`AnalysisConfig`](config::AnalysisConfig)
//! - [`format`] - Message export formats
//! - [`error`] - [`TalkstatsError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

pub mod analyzer;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{Result, TalkstatsError};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use talkstats::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;

    pub use crate::error::{Result, TalkstatsError};

    pub use crate::analyzer::{AnalysisReport, AnalysisResult, ChatAnalyzer, DateRange};
    pub use crate::config::AnalysisConfig;
    pub use crate::core::{FilterOptions, Statistics, apply_filters};
    pub use crate::parser::{Dialect, Parser, create_parser, detect_dialect, parse_auto};

    pub use crate::format::{OutputFormat, write_to_format};

    #[cfg(feature = "json-output")]
    pub use crate::core::output::write_json;
}
