//! Priority Feed Ranking
//!
//! Scores candidate posts and orders them for one of three feed modes.
//!
//! # Modes
//! - **hot**: score desc, then engagement desc
//! - **latest**: `created_at` desc, unparseable timestamps last
//! - **discussed**: comments desc, then score desc, then engagement desc
//!
//! Posts with a blank id are dropped before scoring. Remaining ties keep
//! input order.

pub mod scorer;

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::debug;

use crate::models::{FeedPost, RankedEntry, RankingMode};

pub use scorer::{
    classify_reason, compute_age_hours, freshness_boost, score_post, COMMENT_WEIGHT,
    FRESHNESS_DIVISOR, FRESHNESS_WINDOW_HOURS, INVALID_AGE_HOURS, LIKE_WEIGHT, REPOST_WEIGHT,
    SAVE_WEIGHT,
};

/// Bumped whenever weights, freshness or ordering rules change
pub const ALGORITHM_VERSION: &str = "priority-feed-v1";

/// Rank `posts` for `mode`, keeping at most `limit` entries.
///
/// The evaluation instant is read from the wall clock once for the whole batch.
pub fn rank_priority_feed(posts: &[FeedPost], mode: RankingMode, limit: usize) -> Vec<RankedEntry> {
    rank_priority_feed_at(posts, mode, limit, Utc::now())
}

/// Rank `posts` against an explicit evaluation instant
pub fn rank_priority_feed_at(
    posts: &[FeedPost],
    mode: RankingMode,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<RankedEntry> {
    let mut scored: Vec<(RankedEntry, Option<DateTime<Utc>>)> = posts
        .iter()
        .filter(|post| post.has_valid_id())
        .map(|post| {
            let created_at = post.created_at_utc();
            (scorer::score_post_at(post, created_at, now), created_at)
        })
        .collect();

    let valid_count = scored.len();

    // sort_by is stable, so equal keys keep input order
    match mode {
        RankingMode::Latest => scored.sort_by(|a, b| compare_latest(a.1, b.1)),
        RankingMode::Discussed => scored.sort_by(|a, b| compare_discussed(&a.0, &b.0)),
        RankingMode::Hot => scored.sort_by(|a, b| compare_hot(&a.0, &b.0)),
    }

    let ranked: Vec<RankedEntry> = scored
        .into_iter()
        .take(limit)
        .map(|(entry, _)| entry)
        .collect();

    debug!(
        mode = %mode,
        input = posts.len(),
        valid = valid_count,
        returned = ranked.len(),
        "Priority ranking applied"
    );

    ranked
}

/// Convert a signed limit from text or env input; negatives select nothing
pub fn limit_from_signed(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

fn compare_latest(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_hot(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    compare_score(a, b).then_with(|| b.engagement.cmp(&a.engagement))
}

fn compare_discussed(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.post
        .comments()
        .cmp(&a.post.comments())
        .then_with(|| compare_score(a, b))
        .then_with(|| b.engagement.cmp(&a.engagement))
}

fn compare_score(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}
