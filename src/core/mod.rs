//! Core analysis pipeline.
//!
//! This module contains:
//! - [`filter`] - Date window and keyword options
//! - [`rules`] - Content classification rules (message kind, sentiment, words)
//! - [`aggregate`] - The single-pass [`Accumulator`]
//! - [`session`] - Streak and conversation start/end heuristics
//! - [`ranking`] - Insertion-ordered [`Tally`] and stable rankings
//! - [`stats`] - The [`Statistics`] bundle
//! - [`output`] - Report and message writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use talkstats::core::{FilterOptions, Statistics, apply_filters};
//! use talkstats::config::AnalysisConfig;
//! use talkstats::parser::parse_auto;
//!
//! let messages = parse_auto("2024년1월1일 오전10:00, 철수 : 안녕");
//! let window = apply_filters(&messages, &FilterOptions::new());
//! let stats = Statistics::compute(&window, &[], &AnalysisConfig::default());
//! assert_eq!(stats.total_messages, 1);
//! ```

pub mod aggregate;
pub mod filter;
pub mod output;
pub mod ranking;
pub mod rules;
pub mod session;
pub mod stats;

// Re-export main types for convenience
pub use aggregate::Accumulator;
pub use filter::{FilterOptions, apply_filters};
pub use ranking::Tally;
pub use rules::{MessageKind, Sentiment, TimeSlot};
pub use stats::Statistics;

// Re-export Message from the crate root
pub use crate::Message;

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
