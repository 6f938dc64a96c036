//! # talkstats CLI
//!
//! Command-line interface for the talkstats library.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use talkstats::TalkstatsError;
use talkstats::analyzer::{AnalysisResult, ChatAnalyzer};
use talkstats::cli::{Args, ReportFormat};
use talkstats::core::output::to_json;
use talkstats::core::stats::NameCount;
use talkstats::format::{OutputFormat, write_to_format};

/// Entries shown per ranking in the text report.
const TEXT_TOP: usize = 5;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so the report on stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("talkstats=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), TalkstatsError> {
    let total_start = Instant::now();

    // Validate everything before touching the input
    let options = args.filter_options()?;
    let export_format = args
        .export_messages
        .as_deref()
        .map(OutputFormat::from_path)
        .transpose()?;

    eprintln!("📦 talkstats v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("📂 Input:   {}", args.input);
    eprintln!("📄 Report:  {}", args.format);
    if let Some(ref after) = args.after {
        eprintln!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        eprintln!("📅 Before:  {}", before);
    }

    let parse_start = Instant::now();
    let analyzer = ChatAnalyzer::from_path(&args.input, args.dialect.resolve())?;
    if let Some(dialect) = analyzer.dialect() {
        eprintln!("📖 Dialect: {}", dialect);
    }
    eprintln!(
        "   Found {} messages ({:.2}s)",
        analyzer.len(),
        parse_start.elapsed().as_secs_f64()
    );

    if let (Some(path), Some(format)) = (args.export_messages.as_deref(), export_format) {
        write_to_format(analyzer.messages(), path, format)?;
        eprintln!("💾 Exported messages as {} to {}", format, path);
    }

    let analyze_start = Instant::now();
    let result = analyzer.analyze(&options);
    eprintln!(
        "🔍 Analyzed {} messages ({:.2}s)",
        result.stats.total_messages,
        analyze_start.elapsed().as_secs_f64()
    );

    let mut out: Box<dyn Write> = match args.output {
        Some(ref path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ReportFormat::Json => writeln!(out, "{}", to_json(&result.report())?)?,
        ReportFormat::Text => write_text_report(&mut out, &result)?,
    }
    out.flush()?;

    if let Some(ref path) = args.output {
        eprintln!("✅ Done! Report saved to {}", path);
    }
    eprintln!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn write_text_report(out: &mut dyn Write, result: &AnalysisResult<'_>) -> io::Result<()> {
    let stats = &result.stats;

    writeln!(out, "📊 Chat statistics")?;
    if let Some(range) = result.date_range {
        writeln!(
            out,
            "   Transcript: {} ~ {}",
            range.min.format("%Y-%m-%d %H:%M"),
            range.max.format("%Y-%m-%d %H:%M")
        )?;
    }
    writeln!(out, "   Messages:     {}", stats.total_messages)?;
    writeln!(out, "   Participants: {}", stats.total_participants)?;

    if stats.total_messages == 0 {
        writeln!(out)?;
        writeln!(out, "(no messages in the selected window)")?;
        return Ok(());
    }

    let density = &stats.conversation_density;
    writeln!(
        out,
        "   Active days:  {} of {} ({:.1} messages/day)",
        density.active_days, density.total_days, density.avg_messages_per_day
    )?;
    if let Some(day) = density.most_active_day {
        writeln!(out, "   Busiest day:  {} ({})", day.date, day.count)?;
    }
    if let Some(gap) = density.longest_gap {
        writeln!(
            out,
            "   Longest gap:  {} days ({} ~ {})",
            gap.days, gap.start_date, gap.end_date
        )?;
    }

    write_ranking(out, "🗣️  Top participants", &stats.top_participants)?;
    write_ranking(out, "🚀 Conversation starters", &stats.conversation_starters)?;
    write_ranking(out, "🌙 Late night", &stats.late_night_participants)?;
    write_ranking(out, "😂 Laughing", &stats.top_laughing)?;
    write_ranking(out, "📣 Most mentioned", &stats.top_mentioned)?;

    writeln!(out)?;
    writeln!(out, "🔥 Longest streaks")?;
    for record in stats.spam_participants.iter().take(TEXT_TOP) {
        writeln!(out, "   {:<16} {}", record.name, record.max_consecutive)?;
    }

    writeln!(out)?;
    writeln!(out, "🕐 Time of day")?;
    for share in &stats.activity_by_time_slot {
        writeln!(
            out,
            "   {:<14} {:>6} ({:.1}%)",
            share.slot, share.count, share.percentage
        )?;
    }

    let types = &stats.message_types;
    writeln!(out)?;
    writeln!(
        out,
        "🧾 Types: text {} · photo {} · video {} · emoji {} · link {} · other {}",
        types.text, types.photo, types.video, types.emoji, types.link, types.other
    )?;

    if !stats.top_words.is_empty() {
        let words: Vec<String> = stats
            .top_words
            .iter()
            .take(10)
            .map(|w| format!("{}({})", w.word, w.count))
            .collect();
        writeln!(out, "💬 Words: {}", words.join(" "))?;
    }

    if !stats.keyword_mentions.is_empty() {
        writeln!(out)?;
        writeln!(out, "🔑 Keywords")?;
        for (keyword, senders) in &stats.keyword_mentions {
            let total: usize = senders.iter().map(|s| s.count).sum();
            let leader = senders.first().map_or("", |s| s.name.as_str());
            writeln!(out, "   {:<10} {:>5}  top: {}", keyword, total, leader)?;
        }
    }

    Ok(())
}

fn write_ranking(out: &mut dyn Write, title: &str, entries: &[NameCount]) -> io::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    for (rank, entry) in entries.iter().take(TEXT_TOP).enumerate() {
        writeln!(out, "   {}. {:<16} {}", rank + 1, entry.name, entry.count)?;
    }
    Ok(())
}
