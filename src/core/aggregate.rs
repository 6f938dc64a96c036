//! Single-pass accumulation over a filtered message list.
//!
//! An [`Accumulator`] is created per analysis run, fed every message once
//! through [`observe`](Accumulator::observe), and then handed to the
//! finalizer in [`stats`](crate::core::stats). It is never shared between
//! runs.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::ranking::Tally;
use crate::core::rules::{
    MessageKind, Sentiment, TimeSlot, count_crying, count_laughter, extract_mentions,
    extract_words, is_late_night, weekday_label,
};

/// Message counts per [`MessageKind`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTypeCounts {
    pub text: usize,
    pub photo: usize,
    pub video: usize,
    pub emoji: usize,
    pub link: usize,
    pub other: usize,
}

impl MessageTypeCounts {
    /// Counts one message of `kind`.
    pub fn record(&mut self, kind: MessageKind) {
        *self.slot_mut(kind) += 1;
    }

    /// Count for `kind`.
    pub fn get(&self, kind: MessageKind) -> usize {
        match kind {
            MessageKind::Text => self.text,
            MessageKind::Photo => self.photo,
            MessageKind::Video => self.video,
            MessageKind::Emoji => self.emoji,
            MessageKind::Link => self.link,
            MessageKind::Other => self.other,
        }
    }

    /// Sum over all kinds.
    pub fn total(&self) -> usize {
        self.text + self.photo + self.video + self.emoji + self.link + self.other
    }

    fn slot_mut(&mut self, kind: MessageKind) -> &mut usize {
        match kind {
            MessageKind::Text => &mut self.text,
            MessageKind::Photo => &mut self.photo,
            MessageKind::Video => &mut self.video,
            MessageKind::Emoji => &mut self.emoji,
            MessageKind::Link => &mut self.link,
            MessageKind::Other => &mut self.other,
        }
    }
}

/// Length bucket histogram.
///
/// `one_line` is an independent axis: it counts non-empty bodies without a
/// line break, and the same message also lands in one size bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthBuckets {
    pub one_line: usize,
    /// Length ≤ 5
    pub short: usize,
    /// Length ≤ 50
    pub medium: usize,
    /// Length ≤ 100
    pub long: usize,
    /// Length > 100
    pub very_long: usize,
}

impl LengthBuckets {
    /// Records one body.
    pub fn record(&mut self, body: &str, len: usize) {
        if len > 0 && !body.contains('\n') {
            self.one_line += 1;
        }
        match len {
            0..=5 => self.short += 1,
            6..=50 => self.medium += 1,
            51..=100 => self.long += 1,
            _ => self.very_long += 1,
        }
    }

    /// Sum of all five counters.
    pub fn total(&self) -> usize {
        self.one_line + self.short + self.medium + self.long + self.very_long
    }

    /// Adds another histogram into this one.
    pub fn merge(&mut self, other: &LengthBuckets) {
        self.one_line += other.one_line;
        self.short += other.short;
        self.medium += other.medium;
        self.long += other.long;
        self.very_long += other.very_long;
    }
}

/// Running length total for averaging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthSums {
    pub total: usize,
    pub count: usize,
}

impl LengthSums {
    /// Rounded mean length.
    pub fn average(&self) -> usize {
        if self.count == 0 {
            return 0;
        }
        (self.total as f64 / self.count as f64).round() as usize
    }
}

/// When and on which days a participant was active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presence {
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub active_dates: HashSet<NaiveDate>,
}

impl Presence {
    fn new(at: DateTime<Utc>) -> Self {
        Self {
            first_seen: at,
            last_seen: at,
            active_dates: HashSet::new(),
        }
    }

    fn observe(&mut self, at: DateTime<Utc>) {
        self.first_seen = self.first_seen.min(at);
        self.last_seen = self.last_seen.max(at);
        self.active_dates.insert(at.date_naive());
    }
}

/// Per-sender counts for one tracked keyword.
#[derive(Debug, Clone)]
pub struct TrackedKeyword {
    /// Keyword as supplied.
    pub keyword: String,
    needle: String,
    pub senders: Tally<String>,
}

/// Per-sender counts for each sentiment category.
#[derive(Debug, Clone, Default)]
pub struct SentimentTallies {
    pub positive: Tally<String>,
    pub negative: Tally<String>,
    pub question: Tally<String>,
    pub exclamation: Tally<String>,
}

impl SentimentTallies {
    fn slot_mut(&mut self, sentiment: Sentiment) -> &mut Tally<String> {
        match sentiment {
            Sentiment::Positive => &mut self.positive,
            Sentiment::Negative => &mut self.negative,
            Sentiment::Question => &mut self.question,
            Sentiment::Exclamation => &mut self.exclamation,
        }
    }
}

/// Month key, `YYYY-MM`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Mutable accumulator state for one analysis run.
///
/// Every map keeps first-seen key order.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    pub total: usize,
    pub by_participant: Tally<String>,
    pub by_date: Tally<NaiveDate>,
    pub by_hour: Tally<u32>,
    pub by_weekday: Tally<&'static str>,
    pub kinds: MessageTypeCounts,
    pub mentioned: Tally<String>,
    /// mentioner → mentioned → count
    pub mention_pairs: IndexMap<String, Tally<String>>,
    pub crying: Tally<String>,
    pub laughing: Tally<String>,
    pub lengths: IndexMap<String, LengthSums>,
    pub length_buckets: IndexMap<String, LengthBuckets>,
    pub words: Tally<String>,
    pub late_night: Tally<String>,
    pub photos: Tally<String>,
    pub videos: Tally<String>,
    pub links: Tally<String>,
    pub keywords: Vec<TrackedKeyword>,
    pub sentiments: SentimentTallies,
    pub time_slots: Tally<TimeSlot>,
    pub by_month: Tally<String>,
    pub by_week: Tally<NaiveDate>,
    pub participants_by_month: IndexMap<String, IndexSet<String>>,
    pub presence: IndexMap<String, Presence>,
}

impl Accumulator {
    /// Creates an accumulator tracking exactly `keywords`.
    ///
    /// An empty list tracks no keywords. Blank and repeated entries are
    /// skipped.
    pub fn new(keywords: &[String]) -> Self {
        let mut tracked: Vec<TrackedKeyword> = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            let needle = keyword.trim().to_lowercase();
            if needle.is_empty() || tracked.iter().any(|t| t.keyword == *keyword) {
                continue;
            }
            tracked.push(TrackedKeyword {
                keyword: keyword.clone(),
                needle,
                senders: Tally::new(),
            });
        }

        Self {
            keywords: tracked,
            ..Self::default()
        }
    }

    /// Feeds every message in order.
    pub fn collect<'a, I>(keywords: &[String], messages: I) -> Self
    where
        I: IntoIterator<Item = &'a Message>,
    {
        let mut acc = Self::new(keywords);
        for msg in messages {
            acc.observe(msg);
        }
        acc
    }

    /// Updates every counter with one message.
    pub fn observe(&mut self, msg: &Message) {
        let name = msg.name();
        let body = msg.body();
        let at = msg.timestamp();
        let date = msg.calendar_date();
        let hour = msg.hour();

        self.total += 1;
        self.by_participant.bump(name);
        self.by_date.bump(&date);
        self.by_hour.bump(&hour);
        self.by_weekday.bump(&weekday_label(msg.weekday()));
        self.time_slots.bump(&TimeSlot::from_hour(hour));

        // Timeline and participation
        let month = month_key(date);
        self.by_month.bump(month.as_str());
        self.by_week.bump(&week_start(date));
        self.participants_by_month
            .entry(month)
            .or_default()
            .insert(name.to_string());
        self.presence
            .entry(name.to_string())
            .or_insert_with(|| Presence::new(at))
            .observe(at);

        // Content
        let kind = MessageKind::classify(body);
        self.kinds.record(kind);
        match kind {
            MessageKind::Photo => self.photos.bump(name),
            MessageKind::Video => self.videos.bump(name),
            MessageKind::Link => self.links.bump(name),
            _ => {}
        }

        for mentioned in extract_mentions(body) {
            self.mentioned.bump(mentioned);
            self.mention_pairs
                .entry(name.to_string())
                .or_default()
                .bump(mentioned);
        }

        let crying = count_crying(body);
        if crying > 0 {
            self.crying.add(name, crying);
        }
        let laughing = count_laughter(body);
        if laughing > 0 {
            self.laughing.add(name, laughing);
        }

        // Length
        let len = msg.body_len();
        let sums = self.lengths.entry(name.to_string()).or_default();
        sums.total += len;
        sums.count += 1;
        self.length_buckets
            .entry(name.to_string())
            .or_default()
            .record(body, len);

        if kind == MessageKind::Text && len > 0 {
            for word in extract_words(body) {
                self.words.bump(word.as_str());
            }
        }

        if is_late_night(hour) {
            self.late_night.bump(name);
        }

        // Keywords and sentiment share the lower-cased body
        let lowered = body.to_lowercase();
        for tracked in &mut self.keywords {
            if lowered.contains(&tracked.needle) {
                tracked.senders.bump(name);
            }
        }
        for sentiment in Sentiment::ALL {
            if sentiment.first_match(&lowered).is_some() {
                self.sentiments.slot_mut(sentiment).bump(name);
            }
        }
    }

    /// Length buckets summed across all participants.
    pub fn length_totals(&self) -> LengthBuckets {
        let mut totals = LengthBuckets::default();
        for buckets in self.length_buckets.values() {
            totals.merge(buckets);
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn msg(name: &str, body: &str, d: u32, h: u32) -> Message {
        Message::new(name, body, Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap())
    }

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_basic_counts() {
        let messages = vec![
            msg("철수", "안녕", 1, 10),
            msg("영희", "ㅋㅋㅋ", 1, 11),
            msg("철수", "https://example.com", 2, 3),
        ];
        let acc = Accumulator::collect(&[], &messages);

        assert_eq!(acc.total, 3);
        assert_eq!(acc.by_participant.get("철수"), 2);
        assert_eq!(acc.by_hour.get(&3u32), 1);
        assert_eq!(acc.kinds.link, 1);
        assert_eq!(acc.kinds.text, 2);
        assert_eq!(acc.links.get("철수"), 1);
        assert_eq!(acc.laughing.get("영희"), 1);
        assert_eq!(acc.late_night.get("철수"), 1);
        assert_eq!(acc.by_date.len(), 2);
    }

    #[test]
    fn test_laughing_only_recorded_when_present() {
        let acc = Accumulator::collect(&[], &[msg("철수", "안녕", 1, 10)]);
        assert!(acc.laughing.is_empty());
        assert!(acc.crying.is_empty());
    }

    #[test]
    fn test_mentions_and_pairs() {
        let acc = Accumulator::collect(&[], &[msg("철수", "@영희 @민수/PC @영희", 1, 10)]);
        assert_eq!(acc.mentioned.get("영희"), 2);
        assert_eq!(acc.mentioned.get("민수"), 1);
        assert_eq!(acc.mention_pairs["철수"].get("영희"), 2);
    }

    #[test]
    fn test_keywords_once_per_message() {
        let acc = Accumulator::collect(
            &keywords(&["술", "Band"]),
            &[msg("철수", "술 술 술", 1, 20), msg("영희", "BAND practice", 1, 21)],
        );
        assert_eq!(acc.keywords.len(), 2);
        assert_eq!(acc.keywords[0].senders.get("철수"), 1);
        assert_eq!(acc.keywords[1].keyword, "Band");
        assert_eq!(acc.keywords[1].senders.get("영희"), 1);
    }

    #[test]
    fn test_empty_keyword_list_tracks_nothing() {
        let acc = Accumulator::collect(&[], &[msg("철수", "벙 정모 술", 1, 20)]);
        assert!(acc.keywords.is_empty());
    }

    #[test]
    fn test_blank_and_duplicate_keywords_skipped() {
        let acc = Accumulator::new(&keywords(&["", "  ", "술", "술"]));
        assert_eq!(acc.keywords.len(), 1);
    }

    #[test]
    fn test_words_only_for_text() {
        let acc = Accumulator::collect(
            &[],
            &[msg("철수", "사진 보내요", 1, 10), msg("철수", "그리고 밴드 연습", 1, 11)],
        );
        assert_eq!(acc.words.get("보내요"), 0);
        assert_eq!(acc.words.get("밴드"), 1);
        // stop words are removed at finalization
        assert_eq!(acc.words.get("그리고"), 1);
    }

    #[test]
    fn test_length_buckets() {
        let long = "가".repeat(101);
        let acc = Accumulator::collect(
            &[],
            &[
                msg("a", "", 1, 1),
                msg("a", "12345", 1, 1),
                msg("a", "line\nbreak", 1, 1),
                msg("a", &long, 1, 1),
            ],
        );
        let b = acc.length_buckets["a"];
        assert_eq!(b.short, 2);
        assert_eq!(b.medium, 1);
        assert_eq!(b.very_long, 1);
        assert_eq!(b.one_line, 2);
        assert_eq!(acc.length_totals().total(), 6);
        assert_eq!(acc.lengths["a"].average(), 29);
    }

    #[test]
    fn test_sentiment_categories() {
        let acc = Accumulator::collect(&[], &[msg("철수", "대박 좋아!", 1, 10)]);
        assert_eq!(acc.sentiments.positive.get("철수"), 1);
        assert_eq!(acc.sentiments.exclamation.get("철수"), 1);
        assert!(acc.sentiments.negative.is_empty());
        assert!(acc.sentiments.question.is_empty());
    }

    #[test]
    fn test_week_start_is_sunday() {
        let wed = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let sun = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(week_start(wed), sun);
        assert_eq!(week_start(sun), sun);
        assert_eq!(month_key(wed), "2024-01");
    }

    #[test]
    fn test_presence() {
        let acc = Accumulator::collect(
            &[],
            &[msg("a", "x", 3, 10), msg("a", "y", 1, 9), msg("a", "z", 3, 11)],
        );
        let p = &acc.presence["a"];
        assert_eq!(p.active_dates.len(), 2);
        assert_eq!(p.first_seen, Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
        assert_eq!(p.last_seen, Utc.with_ymd_and_hms(2024, 1, 3, 11, 0, 0).unwrap());
    }
}
