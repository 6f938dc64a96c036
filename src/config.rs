//! Analysis configuration.
//!
//! [`AnalysisConfig`] holds the knobs that shape every statistics bundle:
//! ranking caps, the session heuristic thresholds and the keyword list used
//! when a caller does not supply one. It is free of CLI framework types so
//! library users can build it directly or load it with serde.
//!
//! # Defaults
//!
//! | Setting | Default |
//! |---------|---------|
//! | `ranking_limit` | 20 |
//! | `keyword_ranking_limit` | 10 |
//! | `interaction_limit` | 30 |
//! | `streak_gap_secs` | 300 (5 minutes) |
//! | `session_gap_secs` | 3600 (1 hour) |
//! | `default_keywords` | [`DEFAULT_KEYWORDS`] |
//!
//! # Example
//!
//! ```rust
//! use talkstats::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::new()
//!     .with_ranking_limit(5)
//!     .with_session_gap_secs(30 * 60);
//!
//! assert_eq!(config.ranking_limit, 5);
//! assert_eq!(config.session_gap().num_minutes(), 30);
//! ```

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Keywords tracked when the caller supplies none.
pub const DEFAULT_KEYWORDS: [&str; 11] = [
    "벙", "정모", "술", "맛집", "공연", "연습", "밴드", "음악", "노래", "라이브", "락교",
];

const DEFAULT_STREAK_GAP_SECS: i64 = 5 * 60;
const DEFAULT_SESSION_GAP_SECS: i64 = 60 * 60;

/// Configuration for a statistics run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Cap for general rankings (participants, dates, words, ...).
    pub ranking_limit: usize,

    /// Cap for each per-keyword mention ranking.
    pub keyword_ranking_limit: usize,

    /// Cap for the directed mention-pair ranking.
    pub interaction_limit: usize,

    /// Largest gap, in seconds, that still extends a same-sender streak.
    pub streak_gap_secs: i64,

    /// Silence, in seconds, that separates two conversations.
    pub session_gap_secs: i64,

    /// Keywords used when a filter supplies none (or an empty list).
    pub default_keywords: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ranking_limit: 20,
            keyword_ranking_limit: 10,
            interaction_limit: 30,
            streak_gap_secs: DEFAULT_STREAK_GAP_SECS,
            session_gap_secs: DEFAULT_SESSION_GAP_SECS,
            default_keywords: DEFAULT_KEYWORDS.iter().map(|&k| k.to_string()).collect(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cap for general rankings.
    #[must_use]
    pub fn with_ranking_limit(mut self, limit: usize) -> Self {
        self.ranking_limit = limit;
        self
    }

    /// Sets the cap for per-keyword rankings.
    #[must_use]
    pub fn with_keyword_ranking_limit(mut self, limit: usize) -> Self {
        self.keyword_ranking_limit = limit;
        self
    }

    /// Sets the cap for the interaction ranking.
    #[must_use]
    pub fn with_interaction_limit(mut self, limit: usize) -> Self {
        self.interaction_limit = limit;
        self
    }

    /// Sets the streak gap in seconds.
    #[must_use]
    pub fn with_streak_gap_secs(mut self, secs: i64) -> Self {
        self.streak_gap_secs = secs;
        self
    }

    /// Sets the conversation gap in seconds.
    #[must_use]
    pub fn with_session_gap_secs(mut self, secs: i64) -> Self {
        self.session_gap_secs = secs;
        self
    }

    /// Replaces the default keyword list.
    #[must_use]
    pub fn with_default_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Streak gap as a duration.
    ///
    /// A value outside the representable range falls back to 5 minutes.
    pub fn streak_gap(&self) -> TimeDelta {
        gap_or_default("streak_gap_secs", self.streak_gap_secs, DEFAULT_STREAK_GAP_SECS)
    }

    /// Conversation gap as a duration.
    ///
    /// A value outside the representable range falls back to 1 hour.
    pub fn session_gap(&self) -> TimeDelta {
        gap_or_default("session_gap_secs", self.session_gap_secs, DEFAULT_SESSION_GAP_SECS)
    }
}

fn gap_or_default(field: &str, secs: i64, default_secs: i64) -> TimeDelta {
    TimeDelta::try_seconds(secs).unwrap_or_else(|| {
        tracing::warn!(field, secs, "gap out of range, using default");
        TimeDelta::seconds(default_secs)
    })
}
