use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use priority_ranking::{
    clamp_limit, rank_priority_feed_at, read_posts, read_posts_from_path, Config, RankedEntry,
    RankingError, RankingMode, ALGORITHM_VERSION,
};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "priority-ranking")]
#[command(about = "Rank feed posts as hot, latest or discussed")]
struct Args {
    /// JSON file with post rows (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Ranking mode (hot, latest, discussed); overrides PRIORITY_FEED_MODE
    #[arg(short, long)]
    mode: Option<String>,

    /// Maximum number of entries; overrides PRIORITY_FEED_LIMIT
    #[arg(short, long, allow_negative_numbers = true)]
    limit: Option<i64>,

    /// Evaluation instant as RFC 3339 (defaults to now)
    #[arg(long)]
    now: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RankingOutput {
    algorithm_version: &'static str,
    mode: RankingMode,
    count: usize,
    entries: Vec<RankedEntry>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env().context("Failed to load config")?;

    // Logs go to stderr; stdout carries the ranked JSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let output = run(&args, &config, io::stdin().lock())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if args.pretty {
        serde_json::to_writer_pretty(&mut handle, &output)?;
    } else {
        serde_json::to_writer(&mut handle, &output)?;
    }
    writeln!(handle)?;

    info!("Returned {} ranked entries", output.count);
    Ok(())
}

/// Resolve flags over config, read posts (from `--input` or `stdin`) and rank them
fn run<R: Read>(args: &Args, config: &Config, stdin: R) -> Result<RankingOutput> {
    let mode = args
        .mode
        .as_deref()
        .map(RankingMode::from)
        .unwrap_or(config.mode);
    let limit = args
        .limit
        .map(clamp_limit)
        .unwrap_or_else(|| config.effective_limit());
    let now = match args.now.as_deref() {
        Some(raw) => parse_now(raw)?,
        None => Utc::now(),
    };

    let posts = match &args.input {
        Some(path) => read_posts_from_path(path)
            .with_context(|| format!("Failed to read posts from {}", path.display()))?,
        None => read_posts(stdin).context("Failed to read posts from stdin")?,
    };

    info!(
        "Ranking {} posts (mode={}, limit={}, algorithm={})",
        posts.len(),
        mode,
        limit,
        ALGORITHM_VERSION
    );

    let entries = rank_priority_feed_at(&posts, mode, limit, now);
    Ok(RankingOutput {
        algorithm_version: ALGORITHM_VERSION,
        mode,
        count: entries.len(),
        entries,
    })
}

fn parse_now(raw: &str) -> Result<DateTime<Utc>, RankingError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| RankingError::InvalidTimestamp(format!("{raw}: {e}")))
}
