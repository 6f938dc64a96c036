//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`DialectChoice`] - `auto` or a forced transcript dialect
//! - [`ReportFormat`] - How the statistics report is rendered
//!
//! # Example
//!
//! ```rust
//! use clap::Parser;
//! use talkstats::cli::{Args, ReportFormat};
//!
//! let args = Args::parse_from(["talkstats", "chat.txt", "-k", "술", "--format", "json"]);
//! assert_eq!(args.format, ReportFormat::Json);
//! assert_eq!(args.dialect.resolve(), None);
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::filter::FilterOptions;
use crate::error::Result;
use crate::parser::Dialect;

/// Analyze KakaoTalk chat exports: who talks, when, how much and about what.
#[derive(Parser, Debug, Clone)]
#[command(name = "talkstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    talkstats KakaoTalk_Chat.txt
    talkstats chat.txt --after 2024-01-01 --before 2024-06-30
    talkstats chat.txt -k 술 -k 맛집 --format json -o report.json
    talkstats chat.txt --dialect mobile --export-messages messages.csv
    RUST_LOG=talkstats=trace talkstats chat.txt")]
pub struct Args {
    /// Path to the exported transcript
    pub input: String,

    /// Transcript dialect
    #[arg(short, long, value_enum, default_value = "auto")]
    pub dialect: DialectChoice,

    /// Only analyze messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only analyze messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keyword to track (repeatable; defaults to the built-in list)
    #[arg(short, long = "keyword", value_name = "WORD")]
    pub keywords: Vec<String>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Also export the parsed messages (csv, json or jsonl by extension)
    #[arg(long, value_name = "PATH")]
    pub export_messages: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the per-run filter options from the date and keyword flags.
    ///
    /// # Errors
    ///
    /// Returns [`TalkstatsError::InvalidDate`](crate::TalkstatsError::InvalidDate)
    /// if `--after` or `--before` is not `YYYY-MM-DD`.
    pub fn filter_options(&self) -> Result<FilterOptions> {
        let mut options = FilterOptions::new();
        if let Some(ref after) = self.after {
            options = options.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            options = options.with_date_to(before)?;
        }
        if !self.keywords.is_empty() {
            options = options.with_keywords(self.keywords.iter().cloned());
        }
        Ok(options)
    }
}

/// Dialect selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectChoice {
    /// Detect from the content
    #[default]
    Auto,

    /// Desktop export
    #[value(alias = "pc")]
    Legacy,

    /// Mobile export
    Mobile,
}

impl DialectChoice {
    /// The forced dialect, or `None` to detect.
    pub fn resolve(self) -> Option<Dialect> {
        match self {
            DialectChoice::Auto => None,
            DialectChoice::Legacy => Some(Dialect::Legacy),
            DialectChoice::Mobile => Some(Dialect::Mobile),
        }
    }
}

impl From<Dialect> for DialectChoice {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Legacy => DialectChoice::Legacy,
            Dialect::Mobile => DialectChoice::Mobile,
        }
    }
}

/// How the statistics report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable summary
    #[default]
    Text,

    /// The full statistics bundle as JSON
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}
