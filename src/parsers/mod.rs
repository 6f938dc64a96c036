//! KakaoTalk export parsers.
//!
//! Each parser implements the [`Parser`](crate::parser::Parser) trait for one
//! dialect.
//!
//! # Available Parsers
//!
//! - [`LegacyParser`] - Parses desktop exports (`<date> <time>, <name> : <body>`)
//! - [`MobileParser`] - Parses mobile exports (date markers + `[name] [time] body`)
//!
//! # Example
//!
//! ```rust
//! use talkstats::parser::{Dialect, create_parser};
//!
//! let parser = create_parser(Dialect::Legacy);
//! assert_eq!(parser.name(), "KakaoTalk Legacy");
//! ```

mod legacy;
mod mobile;

pub use legacy::LegacyParser;
pub use mobile::MobileParser;
