//! Shared parsing utilities for both transcript dialects.
//!
//! This module contains the pieces the legacy and mobile parsers have in
//! common: the timestamp normalizer for the `년 월 일` date and meridiem time labels.

pub mod timestamp;

pub use timestamp::{Meridiem, normalize_timestamp, parse_source_date, parse_source_time};
