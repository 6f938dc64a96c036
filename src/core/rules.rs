//! Fixed classification rules applied to every message body.
//!
//! Priority chains are written as ordered rule tables evaluated top to
//! bottom; the first matching rule decides. Counting rules (laughter,
//! crying, mentions, words) operate on runs matched by a regex, so
//! `ㅋㅋㅋㅋ` is one laugh, not four.

use std::fmt;
use std::sync::LazyLock;

use chrono::Weekday;
use regex::Regex;
use serde::{Deserialize, Serialize};

static MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([^/\s@]+)(?:/[^\s@]*)?").expect("Invalid mention regex")
});

static CRYING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ㅜㅠ]+").expect("Invalid crying regex"));

static LAUGHING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(ㅋ+|ㅎ+|ㅊ+|하하|호호|헤헤|히히|크크|킥킥)").expect("Invalid laughing regex")
});

static HANGUL_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[가-힣]{2,}").expect("Invalid Hangul word regex"));

static LATIN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]{2,}").expect("Invalid Latin word regex"));

/// Words excluded from the word ranking.
pub const STOP_WORDS: [&str; 19] = [
    "그리고", "그런데", "그래서", "그러나", "하지만", "그때", "그것", "이것", "저것", "the",
    "and", "or", "but", "is", "are", "was", "were", "this", "that",
];

// ============================================================================
// Message kind
// ============================================================================

/// Content category of a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Photo,
    Video,
    Emoji,
    Link,
    Other,
}

type KindRule = (fn(&str) -> bool, MessageKind);

fn mentions_photo(body: &str) -> bool {
    body.contains("사진") || body.contains("photo") || body.contains("image")
}

fn mentions_video(body: &str) -> bool {
    body.contains("동영상") || body.contains("video")
}

fn mentions_emoji(body: &str) -> bool {
    body.contains("이모티콘") || body.contains("emoji")
}

fn has_url_scheme(body: &str) -> bool {
    body.contains("http://") || body.contains("https://")
}

fn is_blank(body: &str) -> bool {
    body.trim().is_empty()
}

/// Evaluated in order; [`MessageKind::Text`] when nothing matches.
const KIND_RULES: [KindRule; 5] = [
    (mentions_photo, MessageKind::Photo),
    (mentions_video, MessageKind::Video),
    (mentions_emoji, MessageKind::Emoji),
    (has_url_scheme, MessageKind::Link),
    (is_blank, MessageKind::Other),
];

impl MessageKind {
    /// Classifies a body. The first matching rule wins.
    ///
    /// # Example
    ///
    /// ```rust
    /// use talkstats::core::rules::MessageKind;
    ///
    /// assert_eq!(MessageKind::classify("https://example.com"), MessageKind::Link);
    /// assert_eq!(MessageKind::classify("사진 https://x.io"), MessageKind::Photo);
    /// assert_eq!(MessageKind::classify("   "), MessageKind::Other);
    /// assert_eq!(MessageKind::classify("안녕"), MessageKind::Text);
    /// ```
    pub fn classify(body: &str) -> Self {
        KIND_RULES
            .iter()
            .find(|(matches, _)| matches(body))
            .map_or(MessageKind::Text, |&(_, kind)| kind)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::Text => "text",
            MessageKind::Photo => "photo",
            MessageKind::Video => "video",
            MessageKind::Emoji => "emoji",
            MessageKind::Link => "link",
            MessageKind::Other => "other",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Sentiment
// ============================================================================

/// Expression categories. A message may fall into several categories but
/// counts at most once per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Question,
    Exclamation,
}

const POSITIVE: &[&str] = &[
    "좋아", "최고", "고마워", "사랑", "행복", "즐거", "멋있", "예쁘", "귀여", "대박", "완벽",
    "훌륭", "좋다", "좋은", "좋게",
];

const NEGATIVE: &[&str] = &[
    "싫어", "안돼", "아니", "화나", "슬프", "힘들", "짜증", "불편", "나쁘", "안좋", "미워",
    "싫다", "싫은",
];

const QUESTION: &[&str] = &[
    "?", "뭐", "어디", "언제", "누구", "왜", "어떻게", "무엇", "어떤", "몇",
];

const EXCLAMATION: &[&str] = &["와", "헐", "대박", "와우", "오", "와!", "헐!", "!"];

impl Sentiment {
    /// All categories in evaluation order.
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Positive,
        Sentiment::Negative,
        Sentiment::Question,
        Sentiment::Exclamation,
    ];

    /// Ordered keyword list of this category.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Sentiment::Positive => POSITIVE,
            Sentiment::Negative => NEGATIVE,
            Sentiment::Question => QUESTION,
            Sentiment::Exclamation => EXCLAMATION,
        }
    }

    /// First keyword of this category found in an already lower-cased body.
    pub fn first_match(self, lowered: &str) -> Option<&'static str> {
        self.keywords().iter().copied().find(|k| lowered.contains(k))
    }

    /// Categories that apply to a body.
    pub fn detect(body: &str) -> impl Iterator<Item = Sentiment> {
        let lowered = body.to_lowercase();
        Sentiment::ALL
            .into_iter()
            .filter(move |s| s.first_match(&lowered).is_some())
    }
}

// ============================================================================
// Run counters and token extraction
// ============================================================================

/// Number of laughter runs (`ㅋㅋ`, `ㅎㅎ`, `하하`, ...).
pub fn count_laughter(body: &str) -> usize {
    LAUGHING.find_iter(body).count()
}

/// Number of crying runs (`ㅠㅠ`, `ㅜㅜ`, ...).
pub fn count_crying(body: &str) -> usize {
    CRYING.find_iter(body).count()
}

/// Names mentioned with `@name`, in order of appearance.
///
/// A `/suffix` after the name is ignored.
///
/// ```rust
/// use talkstats::core::rules::extract_mentions;
///
/// assert_eq!(extract_mentions("@철수/iPhone 안녕 @영희"), vec!["철수", "영희"]);
/// ```
pub fn extract_mentions(body: &str) -> Vec<&str> {
    MENTION
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Word tokens: Hangul runs first, then lower-cased Latin runs.
pub fn extract_words(body: &str) -> Vec<String> {
    HANGUL_WORD
        .find_iter(body)
        .map(|m| m.as_str().to_string())
        .chain(LATIN_WORD.find_iter(body).map(|m| m.as_str().to_lowercase()))
        .collect()
}

/// Returns `true` for words excluded from the word ranking.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Messages sent in `[2, 5)` count as late night.
pub fn is_late_night(hour: u32) -> bool {
    (2..5).contains(&hour)
}

/// Korean weekday label, e.g. `월요일`.
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "일요일",
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
    }
}

// ============================================================================
// Time-of-day slots
// ============================================================================

/// Six fixed time-of-day slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeSlot {
    /// 0-5
    Dawn,
    /// 6-11
    Morning,
    /// 12-13
    Lunch,
    /// 14-17
    Afternoon,
    /// 18-21
    Evening,
    /// 22-23
    Night,
}

impl TimeSlot {
    /// Slot for an hour of day. Hours past 23 fall into [`TimeSlot::Night`].
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeSlot::Dawn,
            6..=11 => TimeSlot::Morning,
            12..=13 => TimeSlot::Lunch,
            14..=17 => TimeSlot::Afternoon,
            18..=21 => TimeSlot::Evening,
            _ => TimeSlot::Night,
        }
    }

    /// Display label with its hour range.
    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Dawn => "새벽 (0-5시)",
            TimeSlot::Morning => "아침 (6-11시)",
            TimeSlot::Lunch => "점심 (12-13시)",
            TimeSlot::Afternoon => "오후 (14-17시)",
            TimeSlot::Evening => "저녁 (18-21시)",
            TimeSlot::Night => "밤 (22-23시)",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
