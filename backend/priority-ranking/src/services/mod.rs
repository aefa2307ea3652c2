pub mod input;
pub mod priority;

pub use input::{read_posts, read_posts_from_path};
pub use priority::{
    limit_from_signed, rank_priority_feed, rank_priority_feed_at, score_post, ALGORITHM_VERSION,
};
