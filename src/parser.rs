//! Dialect detection and the unified parser trait.
//!
//! KakaoTalk produces two mutually exclusive text export layouts:
//!
//! - **Legacy** (desktop): `2024년 1월 1일 오전 10:00, 철수 : 안녕` headers
//!   followed by free-form body text that may span lines.
//! - **Mobile**: dashed date marker lines plus `[철수] [오전 10:00] 안녕`
//!   message lines.
//!
//! # Example
//!
//! ```rust
//! use talkstats::parser::{Dialect, detect_dialect, parse_auto};
//!
//! let export = "--------------- 2024년 1월 1일 월요일 ---------------\n\
//!               [철수] [오전 10:00] 안녕";
//!
//! assert_eq!(detect_dialect(export), Dialect::Mobile);
//! let messages = parse_auto(export);
//! assert_eq!(messages.len(), 1);
//! ```

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::{Result, TalkstatsError};

/// Matches a mobile message header anywhere in the document.
static MOBILE_SIGNAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[.+?\]\s*\[(?:오전|오후)\s*\d+:\d+\]").expect("Invalid mobile signal regex")
});

/// Transcript dialects understood by the parsers.
///
/// # Example
///
/// ```rust
/// use talkstats::parser::Dialect;
/// use std::str::FromStr;
///
/// assert_eq!(Dialect::from_str("pc").unwrap(), Dialect::Legacy);
/// assert_eq!(Dialect::from_str("mobile").unwrap(), Dialect::Mobile);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Desktop export: `<date> <meridiem time>, <name> : <body>`
    #[serde(alias = "pc")]
    Legacy,

    /// Mobile export: date marker lines + `[name] [meridiem time] body`
    Mobile,
}

impl Dialect {
    /// Returns all dialect names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["legacy", "pc", "mobile"]
    }

    /// Returns all dialects.
    pub fn all() -> &'static [Dialect] {
        &[Dialect::Legacy, Dialect::Mobile]
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Legacy => write!(f, "Legacy"),
            Dialect::Mobile => write!(f, "Mobile"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "pc" => Ok(Dialect::Legacy),
            "mobile" => Ok(Dialect::Mobile),
            _ => Err(format!(
                "Unknown dialect: '{}'. Expected one of: {}",
                s,
                Dialect::all_names().join(", ")
            )),
        }
    }
}

/// Classifies an export.
///
/// A single mobile-style message header anywhere in the text makes the whole
/// document [`Dialect::Mobile`]; otherwise it is [`Dialect::Legacy`].
pub fn detect_dialect(content: &str) -> Dialect {
    if MOBILE_SIGNAL.is_match(content) {
        Dialect::Mobile
    } else {
        Dialect::Legacy
    }
}

/// Reads an export file as UTF-8 text.
///
/// A leading byte-order mark is removed.
pub fn read_export(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let mut content = String::from_utf8(bytes)
        .map_err(|e| TalkstatsError::utf8(format!("reading {}", path.display()), e))?;
    if content.starts_with('\u{feff}') {
        content.remove(0);
    }
    Ok(content)
}

/// Unified trait for transcript parsers.
///
/// Parsing text is infallible: lines and headers that do not fit the
/// dialect's grammar, or whose timestamp cannot be normalized, are skipped.
/// Only reading a file can fail.
///
/// # Example Implementation
///
/// ```rust,ignore
/// impl Parser for MyParser {
///     fn name(&self) -> &'static str { "MyParser" }
///     fn dialect(&self) -> Dialect { Dialect::Legacy }
///
///     fn parse_str(&self, content: &str) -> Vec<Message> {
///         vec![]
///     }
/// }
/// ```
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Returns the dialect this parser handles.
    fn dialect(&self) -> Dialect;

    /// Parses export text into messages in document order.
    fn parse_str(&self, content: &str) -> Vec<Message>;

    /// Reads and parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`TalkstatsError::Io`] if the file cannot be read and
    /// [`TalkstatsError::Utf8`] if it is not valid UTF-8.
    fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let content = read_export(path)?;
        Ok(self.parse_str(&content))
    }

    /// Reads and parses an export file (convenience method accepting &str path).
    fn parse_file(&self, path: &str) -> Result<Vec<Message>> {
        self.parse(Path::new(path))
    }
}

/// Creates a parser for the specified dialect.
///
/// # Example
///
/// ```rust
/// use talkstats::parser::{Dialect, create_parser};
///
/// let parser = create_parser(Dialect::Mobile);
/// assert_eq!(parser.name(), "KakaoTalk Mobile");
/// ```
pub fn create_parser(dialect: Dialect) -> Box<dyn Parser> {
    match dialect {
        Dialect::Legacy => Box::new(crate::parsers::LegacyParser::new()),
        Dialect::Mobile => Box::new(crate::parsers::MobileParser::new()),
    }
}

/// Detects the dialect and parses with the matching parser.
pub fn parse_auto(content: &str) -> Vec<Message> {
    let dialect = detect_dialect(content);
    tracing::debug!(%dialect, bytes = content.len(), "detected transcript dialect");
    create_parser(dialect).parse_str(content)
}
