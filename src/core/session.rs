//! Conversation session heuristics.
//!
//! All three passes expect the filtered list in chronological order.
//!
//! - **Streaks**: runs of messages from one sender, each within `max_gap`
//!   of the previous message.
//! - **Starters**: the first message, and any message following a silence
//!   of at least `gap`.
//! - **Enders**: messages not followed by another message within `gap`.

use chrono::{DateTime, TimeDelta, Utc};

use crate::Message;
use crate::core::ranking::Tally;

/// Longest same-sender streak per participant.
///
/// A message extends the open streak when it comes from the same sender and
/// arrives `0..=max_gap` after the previous message. Anything else closes the
/// streak and opens a new one of length 1. The last open streak is recorded
/// after the loop.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use talkstats::Message;
/// use talkstats::core::session::longest_streaks;
///
/// let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
/// let messages: Vec<Message> = (0..4)
///     .map(|i| Message::new("철수", "ㅋ", t0 + TimeDelta::seconds(i)))
///     .collect();
/// let refs: Vec<&Message> = messages.iter().collect();
///
/// let streaks = longest_streaks(&refs, TimeDelta::minutes(5));
/// assert_eq!(streaks.get("철수"), 4);
/// ```
pub fn longest_streaks(messages: &[&Message], max_gap: TimeDelta) -> Tally<String> {
    let mut best: Tally<String> = Tally::new();
    let mut open: Option<(&str, usize)> = None;
    let mut previous: Option<DateTime<Utc>> = None;

    for msg in messages {
        let extends = match (open, previous) {
            (Some((sender, _)), Some(prev)) if sender == msg.name() => {
                let gap = msg.timestamp() - prev;
                gap >= TimeDelta::zero() && gap <= max_gap
            }
            _ => false,
        };

        if extends {
            if let Some((_, len)) = open.as_mut() {
                *len += 1;
            }
        } else {
            if let Some((sender, len)) = open {
                best.record_max(sender, len);
            }
            open = Some((msg.name(), 1));
        }
        previous = Some(msg.timestamp());
    }

    if let Some((sender, len)) = open {
        best.record_max(sender, len);
    }
    best
}

/// Conversation starts per participant.
pub fn conversation_starters(messages: &[&Message], gap: TimeDelta) -> Tally<String> {
    let mut starters: Tally<String> = Tally::new();
    let mut previous: Option<DateTime<Utc>> = None;

    for msg in messages {
        let at = msg.timestamp();
        if previous.is_none_or(|prev| at - prev >= gap) {
            starters.bump(msg.name());
        }
        previous = Some(at);
    }
    starters
}

/// Conversation ends per participant.
///
/// Messages sharing a timestamp do not answer each other: the comparison is
/// against the first later message with a strictly greater timestamp. The
/// scan keeps a single forward pointer, so the pass is linear.
pub fn conversation_enders(messages: &[&Message], gap: TimeDelta) -> Tally<String> {
    let mut enders: Tally<String> = Tally::new();
    let mut next = 0;

    for (i, msg) in messages.iter().enumerate() {
        let at = msg.timestamp();
        next = next.max(i + 1);
        while next < messages.len() && messages[next].timestamp() <= at {
            next += 1;
        }

        let answered = messages
            .get(next)
            .is_some_and(|reply| reply.timestamp() - at <= gap);
        if !answered {
            enders.bump(msg.name());
        }
    }
    enders
}
