//! Property-based tests for talkstats.
//!
//! These tests generate random transcripts and message lists to check the
//! parser and pipeline invariants.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;

use talkstats::Message;
use talkstats::analyzer::ChatAnalyzer;
use talkstats::core::filter::FilterOptions;
use talkstats::core::session::{conversation_enders, longest_streaks};
use talkstats::parser::{Parser, parse_auto};
use talkstats::parsers::{LegacyParser, MobileParser};

const SENDERS: [&str; 5] = ["철수", "영희", "민수", "지영/iPhone", "Alex"];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn base_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn korean_date(date: NaiveDate) -> String {
    format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
}

/// (hour 0..24, minute) → `오전 H:MM` / `오후 H:MM`
fn meridiem(hour: u32, minute: u32) -> String {
    let marker = if hour < 12 { "오전" } else { "오후" };
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{marker} {h12}:{minute:02}")
}

/// A mobile day block: day offset and its (sender index, hour, minute) lines.
fn arb_day() -> impl Strategy<Value = (i64, Vec<(usize, u32, u32)>)> {
    (
        0i64..400,
        prop::collection::vec((0..SENDERS.len(), 0u32..24, 0u32..60), 0..6),
    )
}

/// Message list with random senders and forward jumps in time.
fn arb_messages(max_len: usize) -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec((0..SENDERS.len(), 0i64..7200), 0..max_len).prop_map(|steps| {
        let mut at = base_instant();
        steps
            .into_iter()
            .enumerate()
            .map(|(i, (sender, jump))| {
                at += TimeDelta::seconds(jump);
                Message::new(SENDERS[sender], format!("message {i}"), at)
            })
            .collect()
    })
}

/// Reference ender detection: compare each message with every later one.
fn enders_quadratic(messages: &[&Message], gap: TimeDelta) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for (i, msg) in messages.iter().enumerate() {
        let answered = messages[i + 1..]
            .iter()
            .any(|later| later.timestamp > msg.timestamp && later.timestamp - msg.timestamp <= gap);
        if !answered {
            match counts.iter_mut().find(|(name, _)| name == &msg.name) {
                Some((_, n)) => *n += 1,
                None => counts.push((msg.name.clone(), 1)),
            }
        }
    }
    counts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // PARSER PROPERTIES
    // ============================================

    /// Every mobile message takes the date of the nearest preceding marker
    #[test]
    fn mobile_dates_follow_nearest_marker(days in prop::collection::vec(arb_day(), 0..8)) {
        let mut text = String::from("KakaoTalk 대화\n");
        let mut expected = Vec::new();
        for (offset, lines) in &days {
            let date = base_date() + TimeDelta::days(*offset);
            text.push_str(&format!("--------------- {} 월요일 ---------------\n", korean_date(date)));
            for &(sender, hour, minute) in lines {
                text.push_str(&format!("[{}] [{}] 안녕\n", SENDERS[sender], meridiem(hour, minute)));
                expected.push(date);
            }
        }

        let parsed = MobileParser::new().parse_str(&text);
        let dates: Vec<NaiveDate> = parsed.iter().map(Message::calendar_date).collect();
        prop_assert_eq!(dates, expected);
    }

    /// N well-formed legacy headers yield N messages with the literal bodies
    #[test]
    fn legacy_yields_one_message_per_header(
        lines in prop::collection::vec((0..SENDERS.len(), 0u32..24, 0u32..60, 0usize..4), 0..30)
    ) {
        let fillers = ["안녕", "ㅋㅋㅋ 진짜?", "https://example.com", "여러 줄\n두번째 줄"];
        let mut text = String::new();
        let mut bodies = Vec::new();
        for (i, &(sender, hour, minute, filler)) in lines.iter().enumerate() {
            let body = format!("{} #{}", fillers[filler], i);
            text.push_str(&format!(
                "{} {}, {} : {}\n",
                korean_date(base_date()),
                meridiem(hour, minute),
                SENDERS[sender],
                body
            ));
            bodies.push(body);
        }

        let parsed = LegacyParser::new().parse_str(&text);
        let parsed_bodies: Vec<&str> = parsed.iter().map(Message::body).collect();
        prop_assert_eq!(parsed_bodies, bodies.iter().map(String::as_str).collect::<Vec<_>>());
    }

    /// Parsing arbitrary text never panics
    #[test]
    fn parse_never_panics(chars in prop::collection::vec(any::<char>(), 0..300)) {
        let text: String = chars.into_iter().collect();
        let _ = parse_auto(&text);
        let _ = ChatAnalyzer::from_text(&text).analyze(&FilterOptions::new());
    }

    /// Any clock hour in a well-formed header is either accepted or dropped
    #[test]
    fn any_clock_hour_never_panics(hour in any::<u32>(), minute in 0u32..60, afternoon in any::<bool>()) {
        let marker = if afternoon { "오후" } else { "오전" };
        let legacy = format!("{} {} {}:{:02}, 철수 : 안녕\n", korean_date(base_date()), marker, hour, minute);
        let mobile = format!(
            "--------------- {} 월요일 ---------------\n[철수] [{} {}:{:02}] 안녕\n",
            korean_date(base_date()),
            marker,
            hour,
            minute
        );

        let expected = usize::from(hour <= 12);
        prop_assert_eq!(LegacyParser::new().parse_str(&legacy).len(), expected);
        prop_assert_eq!(MobileParser::new().parse_str(&mobile).len(), expected);
    }

    // ============================================
    // SESSION PROPERTIES
    // ============================================

    /// k messages from one sender, one second apart, form a streak of k
    #[test]
    fn streak_of_k_messages(k in 1usize..60) {
        let messages: Vec<Message> = (0..k)
            .map(|i| Message::new("철수", "ㅋ", base_instant() + TimeDelta::seconds(i as i64)))
            .collect();
        let refs: Vec<&Message> = messages.iter().collect();
        prop_assert_eq!(longest_streaks(&refs, TimeDelta::minutes(5)).get("철수"), k);
    }

    /// The first message of any window starts a conversation
    #[test]
    fn first_message_in_window_is_starter(
        messages in arb_messages(40),
        skip in 0usize..40,
    ) {
        let analyzer = ChatAnalyzer::from_messages(messages);
        prop_assume!(skip < analyzer.len());

        // ties share a timestamp, so the window may open on an earlier message
        let start = analyzer.messages()[skip].timestamp;
        let first = analyzer.messages().iter().find(|m| m.timestamp >= start).unwrap();
        let result = analyzer.analyze(&FilterOptions::new().with_start(start));
        let started = result
            .stats
            .conversation_starters
            .iter()
            .find(|e| e.name == first.name)
            .map_or(0, |e| e.count);
        prop_assert!(started >= 1);
    }

    /// The forward sweep agrees with the pairwise definition of enders
    #[test]
    fn enders_match_quadratic_reference(messages in arb_messages(40)) {
        let refs: Vec<&Message> = messages.iter().collect();
        let gap = TimeDelta::hours(1);
        let fast: Vec<(String, usize)> = conversation_enders(&refs, gap)
            .iter()
            .map(|(name, count)| (name.clone(), count))
            .collect();
        prop_assert_eq!(fast, enders_quadratic(&refs, gap));
    }

    // ============================================
    // FILTER PROPERTIES
    // ============================================

    /// Filtering with the full time range reproduces the unfiltered bundle
    #[test]
    fn full_range_filter_is_noop(messages in arb_messages(40)) {
        let analyzer = ChatAnalyzer::from_messages(messages);
        let unfiltered = analyzer.analyze(&FilterOptions::new());
        let options = match analyzer.date_range() {
            Some(range) => FilterOptions::new().with_start(range.min).with_end(range.max),
            None => FilterOptions::new(),
        };
        prop_assert_eq!(unfiltered.stats, analyzer.analyze(&options).stats);
    }

    /// A window never grows the message count
    #[test]
    fn window_never_increases_count(messages in arb_messages(40), hours in 0i64..48) {
        let analyzer = ChatAnalyzer::from_messages(messages);
        let options = FilterOptions::new().with_end(base_instant() + TimeDelta::hours(hours));
        let windowed = analyzer.analyze(&options).stats.total_messages;
        prop_assert!(windowed <= analyzer.len());
    }
}
