//! The statistics bundle and its finalizer.
//!
//! [`Statistics::compute`] runs the accumulator and the session heuristics
//! over one filtered message list and converts every accumulator into an
//! immutable, deterministically ordered ranking.
//!
//! # Ordering
//!
//! | Collection | Order | Cap |
//! |------------|-------|-----|
//! | Name/date/hour/word rankings | count desc, ties first-seen | `ranking_limit` |
//! | Keyword rankings | count desc, ties first-seen | `keyword_ranking_limit` |
//! | Interactions | count desc, ties first-seen | `interaction_limit` |
//! | Time-of-day slots | count desc, ties first-seen | none |
//! | Timelines, monthly participants | chronological | none |
//!
//! Serialized field names are camelCase.

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::config::AnalysisConfig;
use crate::core::aggregate::{Accumulator, LengthBuckets, MessageTypeCounts};
use crate::core::ranking::{Tally, rank_by};
use crate::core::rules::is_stop_word;
use crate::core::session::{conversation_enders, conversation_starters, longest_streaks};

// ============================================================================
// Ranking records
// ============================================================================

/// A participant and a count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCount {
    pub name: String,
    pub count: usize,
}

/// A calendar date and a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// An hour of day and a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCount {
    pub hour: u32,
    pub count: usize,
}

/// A word and how often it was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Rounded mean body length of a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageLength {
    pub name: String,
    pub avg_length: usize,
}

/// Longest same-sender streak of a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    pub name: String,
    pub max_consecutive: usize,
}

/// Directed mention count between two participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub from: String,
    pub to: String,
    pub count: usize,
}

/// Rankings per sentiment category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    pub positive: Vec<NameCount>,
    pub negative: Vec<NameCount>,
    pub questions: Vec<NameCount>,
    pub exclamations: Vec<NameCount>,
}

/// Share of messages sent in one time-of-day slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotShare {
    pub slot: String,
    pub count: usize,
    /// `count / total × 100`
    pub percentage: f64,
}

/// Length buckets of one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantLengths {
    pub name: String,
    #[serde(flatten)]
    pub buckets: LengthBuckets,
}

/// Global length buckets plus the per-participant breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthPattern {
    #[serde(flatten)]
    pub totals: LengthBuckets,
    pub by_participant: Vec<ParticipantLengths>,
}

/// The longest stretch between two consecutive active days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayGap {
    pub days: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// How densely the conversation is spread over the calendar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDensity {
    /// Messages per active day, one decimal.
    pub avg_messages_per_day: f64,
    pub most_active_day: Option<DateCount>,
    pub quietest_day: Option<DateCount>,
    pub longest_gap: Option<DayGap>,
    pub active_days: usize,
    /// Calendar days from the first to the last active day, inclusive.
    pub total_days: usize,
}

/// Messages in one calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub month: String,
    pub count: usize,
}

/// Messages in the week starting on a Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekCount {
    pub week: NaiveDate,
    pub count: usize,
}

/// Monthly and weekly message timelines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineHeatmap {
    pub by_month: Vec<MonthCount>,
    pub by_week: Vec<WeekCount>,
}

/// Activity span of a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySpan {
    pub name: String,
    /// Distinct calendar dates with at least one message.
    pub days_active: usize,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// Participation over time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationTrend {
    /// Distinct participants per month, chronological.
    pub monthly_participants: Vec<MonthCount>,
    pub participant_activity_period: Vec<ActivitySpan>,
}

// ============================================================================
// Statistics bundle
// ============================================================================

/// Every aggregate computed for one filtered message list.
///
/// An empty list yields zero totals and empty collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_messages: usize,
    pub total_participants: usize,

    pub messages_by_participant: IndexMap<String, usize>,
    pub messages_by_date: IndexMap<NaiveDate, usize>,
    pub messages_by_hour: IndexMap<u32, usize>,
    pub messages_by_day_of_week: IndexMap<String, usize>,
    pub message_types: MessageTypeCounts,

    pub top_participants: Vec<NameCount>,
    pub top_dates: Vec<DateCount>,
    pub top_hours: Vec<HourCount>,

    pub mentions_by_participant: IndexMap<String, usize>,
    pub crying_by_participant: IndexMap<String, usize>,
    pub laughing_by_participant: IndexMap<String, usize>,
    pub top_mentioned: Vec<NameCount>,
    pub top_crying: Vec<NameCount>,
    pub top_laughing: Vec<NameCount>,

    pub avg_message_length_by_participant: Vec<AverageLength>,
    pub top_words: Vec<WordCount>,
    pub late_night_participants: Vec<NameCount>,
    pub spam_participants: Vec<StreakRecord>,
    pub photo_sharing: Vec<NameCount>,
    pub video_sharing: Vec<NameCount>,
    pub link_sharing: Vec<NameCount>,
    /// Keywords with at least one mention, in keyword-list order.
    pub keyword_mentions: IndexMap<String, Vec<NameCount>>,

    pub conversation_starters: Vec<NameCount>,
    pub conversation_enders: Vec<NameCount>,
    pub emotion_analysis: EmotionAnalysis,
    pub activity_by_time_slot: Vec<TimeSlotShare>,
    pub message_length_pattern: LengthPattern,
    pub conversation_density: ConversationDensity,
    pub participant_interactions: Vec<Interaction>,
    pub timeline_heatmap: TimelineHeatmap,
    pub participation_trend: ParticipationTrend,
}

/// Tallies produced by the session heuristics.
struct Sessions {
    streaks: Tally<String>,
    starters: Tally<String>,
    enders: Tally<String>,
}

impl Statistics {
    /// Computes the bundle for a chronologically ordered message list.
    ///
    /// `keywords` is used as given: an empty slice tracks no keywords.
    ///
    /// # Example
    ///
    /// ```rust
    /// use talkstats::config::AnalysisConfig;
    /// use talkstats::core::stats::Statistics;
    /// use talkstats::parser::parse_auto;
    ///
    /// let messages = parse_auto(
    ///     "2024년1월1일 오전10:00, 철수 : 안녕\n2024년1월1일 오전10:01, 영희 : 안녕하세요",
    /// );
    /// let refs: Vec<_> = messages.iter().collect();
    /// let stats = Statistics::compute(&refs, &[], &AnalysisConfig::default());
    ///
    /// assert_eq!(stats.total_messages, 2);
    /// assert_eq!(stats.total_participants, 2);
    /// assert_eq!(stats.conversation_starters[0].name, "철수");
    /// ```
    pub fn compute(messages: &[&Message], keywords: &[String], config: &AnalysisConfig) -> Self {
        let acc = Accumulator::collect(keywords, messages.iter().copied());
        let sessions = Sessions {
            streaks: longest_streaks(messages, config.streak_gap()),
            starters: conversation_starters(messages, config.session_gap()),
            enders: conversation_enders(messages, config.session_gap()),
        };
        tracing::debug!(
            messages = acc.total,
            participants = acc.by_participant.len(),
            keywords = acc.keywords.len(),
            "computed statistics"
        );
        Self::finalize(acc, &sessions, config)
    }

    fn finalize(mut acc: Accumulator, sessions: &Sessions, config: &AnalysisConfig) -> Self {
        let limit = config.ranking_limit;

        let top_words = acc
            .words
            .iter()
            .filter(|(word, _)| !is_stop_word(word) && word.chars().count() >= 2)
            .map(|(word, count)| WordCount {
                word: word.clone(),
                count,
            })
            .collect();

        let avg_lengths = acc
            .lengths
            .iter()
            .map(|(name, sums)| AverageLength {
                name: name.clone(),
                avg_length: sums.average(),
            })
            .collect();

        let keyword_mentions = acc
            .keywords
            .iter()
            .filter(|tracked| !tracked.senders.is_empty())
            .map(|tracked| {
                (
                    tracked.keyword.clone(),
                    name_counts(&tracked.senders, config.keyword_ranking_limit),
                )
            })
            .collect();

        let interactions = acc
            .mention_pairs
            .iter()
            .flat_map(|(from, targets)| {
                targets.iter().map(move |(to, count)| Interaction {
                    from: from.clone(),
                    to: to.clone(),
                    count,
                })
            })
            .collect();

        let streaks = sessions
            .streaks
            .iter()
            .map(|(name, max)| StreakRecord {
                name: name.clone(),
                max_consecutive: max,
            })
            .collect();

        // Rank before sorting so ties keep first-seen order
        let top_dates = acc
            .by_date
            .ranked(limit)
            .into_iter()
            .map(|(date, count)| DateCount { date, count })
            .collect();
        acc.by_date.sort_keys();
        let density = conversation_density(&acc.by_date, acc.total);

        Statistics {
            total_messages: acc.total,
            total_participants: acc.by_participant.len(),

            top_participants: name_counts(&acc.by_participant, limit),
            top_dates,
            top_hours: acc
                .by_hour
                .ranked(limit)
                .into_iter()
                .map(|(hour, count)| HourCount { hour, count })
                .collect(),

            top_mentioned: name_counts(&acc.mentioned, limit),
            top_crying: name_counts(&acc.crying, limit),
            top_laughing: name_counts(&acc.laughing, limit),

            avg_message_length_by_participant: rank_by(avg_lengths, |a| a.avg_length, limit),
            top_words: rank_by(top_words, |w| w.count, limit),
            late_night_participants: name_counts(&acc.late_night, limit),
            spam_participants: rank_by(streaks, |s| s.max_consecutive, limit),
            photo_sharing: name_counts(&acc.photos, limit),
            video_sharing: name_counts(&acc.videos, limit),
            link_sharing: name_counts(&acc.links, limit),
            keyword_mentions,

            conversation_starters: name_counts(&sessions.starters, limit),
            conversation_enders: name_counts(&sessions.enders, limit),
            emotion_analysis: EmotionAnalysis {
                positive: name_counts(&acc.sentiments.positive, limit),
                negative: name_counts(&acc.sentiments.negative, limit),
                questions: name_counts(&acc.sentiments.question, limit),
                exclamations: name_counts(&acc.sentiments.exclamation, limit),
            },
            activity_by_time_slot: time_slot_shares(&acc),
            message_length_pattern: length_pattern(&acc, limit),
            conversation_density: density,
            participant_interactions: rank_by(interactions, |i| i.count, config.interaction_limit),
            timeline_heatmap: timeline(&mut acc),
            participation_trend: participation(&acc, limit),

            messages_by_participant: acc.by_participant.into_map(),
            messages_by_date: acc.by_date.into_map(),
            messages_by_hour: acc.by_hour.into_map(),
            messages_by_day_of_week: acc
                .by_weekday
                .into_map()
                .into_iter()
                .map(|(day, count)| (day.to_string(), count))
                .collect(),
            message_types: acc.kinds,
            mentions_by_participant: acc.mentioned.into_map(),
            crying_by_participant: acc.crying.into_map(),
            laughing_by_participant: acc.laughing.into_map(),
        }
    }
}

fn name_counts(tally: &Tally<String>, limit: usize) -> Vec<NameCount> {
    tally
        .ranked(limit)
        .into_iter()
        .map(|(name, count)| NameCount { name, count })
        .collect()
}

fn time_slot_shares(acc: &Accumulator) -> Vec<TimeSlotShare> {
    let total = acc.time_slots.total();
    acc.time_slots
        .ranked(usize::MAX)
        .into_iter()
        .map(|(slot, count)| TimeSlotShare {
            slot: slot.label().to_string(),
            count,
            percentage: if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

fn length_pattern(acc: &Accumulator, limit: usize) -> LengthPattern {
    let rows = acc
        .length_buckets
        .iter()
        .map(|(name, buckets)| ParticipantLengths {
            name: name.clone(),
            buckets: *buckets,
        })
        .collect();

    LengthPattern {
        totals: acc.length_totals(),
        by_participant: rank_by(rows, |row| row.buckets.total(), limit),
    }
}

/// Expects `by_date` sorted by date.
fn conversation_density(by_date: &Tally<NaiveDate>, total: usize) -> ConversationDensity {
    let days: Vec<(NaiveDate, usize)> = by_date.iter().map(|(d, c)| (*d, c)).collect();
    let (Some(&(first, _)), Some(&(last, _))) = (days.first(), days.last()) else {
        return ConversationDensity::default();
    };

    let mut most_active: Option<DateCount> = None;
    let mut quietest: Option<DateCount> = None;
    for &(date, count) in &days {
        if most_active.is_none_or(|best| count > best.count) {
            most_active = Some(DateCount { date, count });
        }
        if count > 0 && quietest.is_none_or(|q| count < q.count) {
            quietest = Some(DateCount { date, count });
        }
    }

    let mut longest_gap: Option<DayGap> = None;
    for pair in days.windows(2) {
        let (start, end) = (pair[0].0, pair[1].0);
        let gap = (end - start).num_days();
        if longest_gap.is_none_or(|g| gap > g.days) {
            longest_gap = Some(DayGap {
                days: gap,
                start_date: start,
                end_date: end,
            });
        }
    }

    let active_days = days.len();
    let avg = total as f64 / active_days as f64;

    ConversationDensity {
        avg_messages_per_day: (avg * 10.0).round() / 10.0,
        most_active_day: most_active,
        quietest_day: quietest,
        longest_gap,
        active_days,
        total_days: ((last - first).num_days() + 1) as usize,
    }
}

fn timeline(acc: &mut Accumulator) -> TimelineHeatmap {
    acc.by_month.sort_keys();
    acc.by_week.sort_keys();
    TimelineHeatmap {
        by_month: acc
            .by_month
            .iter()
            .map(|(month, count)| MonthCount {
                month: month.clone(),
                count,
            })
            .collect(),
        by_week: acc
            .by_week
            .iter()
            .map(|(week, count)| WeekCount { week: *week, count })
            .collect(),
    }
}

fn participation(acc: &Accumulator, limit: usize) -> ParticipationTrend {
    let mut months: Vec<(&String, usize)> = acc
        .participants_by_month
        .iter()
        .map(|(month, names)| (month, names.len()))
        .collect();
    months.sort_by(|a, b| a.0.cmp(b.0));

    let spans = acc
        .presence
        .iter()
        .map(|(name, presence)| ActivitySpan {
            name: name.clone(),
            days_active: presence.active_dates.len(),
            first_seen: presence.first_seen,
            last_seen: presence.last_seen,
        })
        .collect();

    ParticipationTrend {
        monthly_participants: months
            .into_iter()
            .map(|(month, count)| MonthCount {
                month: month.clone(),
                count,
            })
            .collect(),
        participant_activity_period: rank_by(spans, |s| s.days_active, limit),
    }
}
