//! Priority feed ranking
//!
//! Scores social posts already fetched by the feed layer and orders them for
//! the `hot`, `latest` or `discussed` feed, annotating each entry with the
//! reason it was prioritized.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{clamp_limit, Config};
pub use error::{RankingError, Result};
pub use models::{FeedPost, PriorityReason, RankedEntry, RankingMode};
pub use services::{
    limit_from_signed, rank_priority_feed, rank_priority_feed_at, read_posts,
    read_posts_from_path, score_post, ALGORITHM_VERSION,
};
