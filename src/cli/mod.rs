use std::fmt::Write as _;
use std::path::PathBuf;
use anyhow::{Context, Result};
use chrono::Utc;

use crate::config::Config;
use crate::core::questions::scale_label;
use crate::core::{
    aggregate_with, compare, AnswerSheet, ComparisonResult, PairMatching, PersonalityProfile,
    ProfileRepository, QuestionBank,
};

pub use commands::{Args, Commands};

mod commands;

pub fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Questions => handle_questions(),
        Commands::Take { scores, answers, unordered_pairs } => {
            handle_take(args.data_dir, &scores, &answers, unordered_pairs)
        }
        Commands::Current { json } => handle_current(args.data_dir, json),
        Commands::History { limit, json } => handle_history(args.data_dir, limit, json),
        Commands::Compare { before, after, json } => handle_compare(args.data_dir, before, after, json),
        Commands::Reset => handle_reset(args.data_dir),
    }
}

pub fn handle_questions() -> Result<()> {
    let bank = QuestionBank::default();

    println!("📋 Personality quiz ({} questions)", bank.len());
    for question in bank.questions() {
        println!("  {:>2}. [{}] {}", question.id, question.category, question.text);
    }
    let scale = (1..=5)
        .map(|s| format!("{} = {}", s, scale_label(s)))
        .collect::<Vec<_>>()
        .join(", ");
    println!("\nScale: {}", scale);

    Ok(())
}

pub fn handle_take(
    data_dir: Option<PathBuf>,
    scores: &[i64],
    answers: &[(String, i64)],
    unordered_pairs: bool,
) -> Result<()> {
    let config = Config::new(data_dir)?;
    let bank = QuestionBank::default();

    if scores.len() > bank.len() {
        anyhow::bail!("Got {} scores but the quiz has {} questions", scores.len(), bank.len());
    }

    let mut sheet = AnswerSheet::from_scores(&bank, scores)?;
    for (id, score) in answers {
        let question = bank.find(id)?;
        sheet.record(question, *score)?;
    }

    if sheet.is_empty() {
        anyhow::bail!("No answers given; use --scores or --answer");
    }
    if !sheet.is_complete(&bank) {
        tracing::warn!(answered = sheet.len(), total = bank.len(), "scoring an incomplete quiz");
    }

    let matching = if unordered_pairs {
        PairMatching::Unordered
    } else {
        config.pair_matching
    };
    let result = aggregate_with(sheet.answers(), matching);
    let profile = PersonalityProfile::new(result);

    let mut store = config.open_store()?;
    store.save(&profile).context("Failed to save profile")?;

    print!("{}", render_profile(&profile));
    println!("✨ Profile saved ({})", profile.id);

    Ok(())
}

pub fn handle_current(data_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let config = Config::new(data_dir)?;
    let store = config.open_store()?;

    let Some(profile) = store.current() else {
        println!("No profile yet. Run `lifesync take` to complete the quiz.");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(profile)?);
        return Ok(());
    }

    print!("{}", render_profile(profile));
    if profile.needs_retake(Utc::now(), config.retake_after_days) {
        println!(
            "⏰ It's been over {} days! Consider retaking the quiz for updated insights.",
            config.retake_after_days
        );
    }

    Ok(())
}

pub fn handle_history(data_dir: Option<PathBuf>, limit: usize, json: bool) -> Result<()> {
    let config = Config::new(data_dir)?;
    let store = config.open_store()?;
    let recent = store.recent(limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&recent)?);
        return Ok(());
    }

    if recent.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }

    println!("📊 Profiles ({} of {}):", recent.len(), store.history().len());
    for profile in recent {
        println!(
            "  {} - {} {} ({})",
            profile.id,
            profile.emoji,
            profile.personality_type,
            profile.created_at.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}

pub fn handle_compare(
    data_dir: Option<PathBuf>,
    before: Option<String>,
    after: Option<String>,
    json: bool,
) -> Result<()> {
    let config = Config::new(data_dir)?;
    let store = config.open_store()?;
    let (before, after) = select_pair(&store, before.as_deref(), after.as_deref())?;

    let results = compare(before, after);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", render_comparison(before, after, &results));
    }

    Ok(())
}

pub fn handle_reset(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut store = config.open_store()?;
    let count = store.history().len();

    store.clear()?;
    println!("🗑️  Removed {} profile(s) from {}", count, store.path().display());

    Ok(())
}

/// Resolve the profiles to compare. Without ids the two most recent are used;
/// with only `before`, the current profile is the later one; with only
/// `after`, the profile stored just before it is the earlier one.
pub fn select_pair<'a, R: ProfileRepository>(
    store: &'a R,
    before: Option<&str>,
    after: Option<&str>,
) -> Result<(&'a PersonalityProfile, &'a PersonalityProfile)> {
    let history = store.history();

    let after = match after {
        Some(id) => store.get(id)?,
        None => history
            .last()
            .context("No stored profiles to compare")?,
    };
    let before = match before {
        Some(id) => store.get(id)?,
        None => {
            let position = history
                .iter()
                .position(|p| p.id == after.id)
                .unwrap_or(history.len());
            history[..position]
                .last()
                .context("Need an earlier stored profile to compare against")?
        }
    };

    Ok((before, after))
}

pub fn render_profile(profile: &PersonalityProfile) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", profile.emoji, profile.personality_type);
    let _ = writeln!(out, "{}", profile.summary);
    let _ = writeln!(out, "Generated {}", profile.created_at.format("%Y-%m-%d"));
    let _ = writeln!(out);
    for score in profile.radar_data() {
        let filled = score.value.min(100) as usize / 5;
        let _ = writeln!(
            out,
            "  {:<18} {:>3}% {}{}",
            score.category.name(),
            score.value,
            "█".repeat(filled),
            "░".repeat(20usize.saturating_sub(filled))
        );
    }

    out
}

pub fn render_comparison(
    before: &PersonalityProfile,
    after: &PersonalityProfile,
    results: &[ComparisonResult],
) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Before {} {} ({})  →  After {} {} ({})",
        before.emoji,
        before.personality_type,
        before.created_at.format("%Y-%m-%d"),
        after.emoji,
        after.personality_type,
        after.created_at.format("%Y-%m-%d")
    );
    for r in results {
        let _ = writeln!(
            out,
            "  {:<18} {:>3} → {:>3}  {} {:+}",
            r.category.name(),
            r.value_before,
            r.value_after,
            r.change.symbol(),
            r.delta()
        );
    }

    out
}
