//! Unified error types for talkstats.
//!
//! Parsing and analysis are infallible by construction: malformed headers,
//! notice lines and unparseable timestamps are skipped, never reported.
//! The errors here come from the edges of the library:
//!
//! - acquiring the raw export text (I/O, UTF-8 decoding)
//! - validating caller-supplied filter dates and format names
//! - writing reports and message exports

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for talkstats operations.
///
/// # Example
///
/// ```rust
/// use talkstats::error::Result;
/// use talkstats::Message;
///
/// fn load() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, TalkstatsError>;

/// The error type for all talkstats operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TalkstatsError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The export file doesn't exist
    /// - Permission denied
    /// - The output location is not writable
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The raw export is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Invalid date in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A format or dialect name was not recognized.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What kind of format was expected ("output", "dialect")
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for TalkstatsError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        TalkstatsError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl TalkstatsError {
    /// Creates a UTF-8 error with a description of what was being decoded.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        TalkstatsError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        TalkstatsError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        TalkstatsError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, TalkstatsError::Io(_))
    }

    /// Returns `true` if this is a UTF-8 decoding error.
    pub fn is_utf8(&self) -> bool {
        matches!(self, TalkstatsError::Utf8 { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, TalkstatsError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, TalkstatsError::InvalidDate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = TalkstatsError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_invalid_format_display() {
        let err = TalkstatsError::invalid_format("dialect", "unknown dialect 'xml'");
        let display = err.to_string();
        assert!(display.contains("dialect"));
        assert!(display.contains("unknown dialect 'xml'"));
    }

    #[test]
    fn test_invalid_date_display() {
        let err = TalkstatsError::invalid_date("2024/01/01");
        let display = err.to_string();
        assert!(display.contains("2024/01/01"));
        assert!(display.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_utf8_error_display() {
        let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err = TalkstatsError::utf8("reading chat export", utf8_err);
        let display = err.to_string();
        assert!(display.contains("UTF-8"));
        assert!(display.contains("reading chat export"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = TalkstatsError::from(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_is_methods() {
        let io_err = TalkstatsError::Io(io::Error::new(io::ErrorKind::NotFound, ""));
        assert!(io_err.is_io());
        assert!(!io_err.is_utf8());
        assert!(!io_err.is_invalid_format());
        assert!(!io_err.is_invalid_date());

        let date_err = TalkstatsError::invalid_date("bad");
        assert!(date_err.is_invalid_date());
        assert!(!date_err.is_io());
    }

    #[test]
    fn test_from_utf8_error() {
        let utf8_err = String::from_utf8(vec![0xc3, 0x28]).unwrap_err();
        let err: TalkstatsError = utf8_err.into();
        assert!(err.is_utf8());
        assert!(err.to_string().contains("UTF-8"));
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: TalkstatsError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[cfg(feature = "csv-output")]
    #[test]
    fn test_from_csv_error() {
        let csv_err = csv::Error::from(io::Error::other("disk full"));
        let err: TalkstatsError = csv_err.into();
        assert!(err.to_string().contains("CSV error"));
    }

    #[test]
    fn test_error_debug() {
        let err = TalkstatsError::invalid_date("bad");
        let debug = format!("{:?}", err);
        assert!(debug.contains("InvalidDate"));
    }
}
