// ============================================
// Priority Scorer
// ============================================
//
// score = likes*2 + comments*3 + reposts*4 + saves*2 + freshness_boost
//
// freshness_boost decays linearly from 6.0 at age 0 to 0.0 at 36h.

use chrono::{DateTime, Utc};

use crate::models::{FeedPost, PriorityReason, RankedEntry};
use crate::utils::elapsed_hours;

pub const LIKE_WEIGHT: f64 = 2.0;
pub const COMMENT_WEIGHT: f64 = 3.0;
pub const REPOST_WEIGHT: f64 = 4.0;
pub const SAVE_WEIGHT: f64 = 2.0;

pub const FRESHNESS_WINDOW_HOURS: f64 = 36.0;
pub const FRESHNESS_DIVISOR: f64 = 6.0;

/// Age assigned to posts whose `created_at` cannot be parsed
pub const INVALID_AGE_HOURS: f64 = 999.0;

const RESHARE_THRESHOLD: u64 = 3;
const DISCUSSION_THRESHOLD: u64 = 4;
const POSITIVE_RESPONSE_THRESHOLD: u64 = 8;
const RECENT_POST_HOURS: f64 = 6.0;

/// Score a single post against the evaluation instant `now`
pub fn score_post(post: &FeedPost, now: DateTime<Utc>) -> RankedEntry {
    score_post_at(post, post.created_at_utc(), now)
}

/// Same as [`score_post`] with `created_at` already parsed by the caller
pub(crate) fn score_post_at(
    post: &FeedPost,
    created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> RankedEntry {
    let likes = post.likes();
    let comments = post.comments();
    let reposts = post.reposts();
    let saves = post.saves();

    let age_hours = compute_age_hours(created_at, now);

    let score = likes as f64 * LIKE_WEIGHT
        + comments as f64 * COMMENT_WEIGHT
        + reposts as f64 * REPOST_WEIGHT
        + saves as f64 * SAVE_WEIGHT
        + freshness_boost(age_hours);

    RankedEntry {
        post: post.clone(),
        score,
        engagement: post.engagement(),
        age_hours,
        reason: classify_reason(likes, comments, reposts, age_hours),
    }
}

pub fn compute_age_hours(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match created_at {
        Some(ts) => elapsed_hours(ts, now),
        None => INVALID_AGE_HOURS,
    }
}

pub fn freshness_boost(age_hours: f64) -> f64 {
    (FRESHNESS_WINDOW_HOURS - age_hours).max(0.0) / FRESHNESS_DIVISOR
}

/// First matching rule wins; a heavily reshared post that is also heavily
/// discussed is labelled as reshared.
pub fn classify_reason(likes: u64, comments: u64, reposts: u64, age_hours: f64) -> PriorityReason {
    if reposts >= RESHARE_THRESHOLD {
        PriorityReason::FrequentlyReshared
    } else if comments >= DISCUSSION_THRESHOLD {
        PriorityReason::ActiveDiscussion
    } else if likes >= POSITIVE_RESPONSE_THRESHOLD {
        PriorityReason::HighPositiveResponse
    } else if age_hours <= RECENT_POST_HOURS {
        PriorityReason::RecentPost
    } else {
        PriorityReason::WorthPrioritizing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 19, 12, 0, 0).unwrap()
    }

    fn create_test_post(
        id: &str,
        created_at: DateTime<Utc>,
        likes: u64,
        comments: u64,
        shares: u64,
        saves: u64,
    ) -> FeedPost {
        FeedPost {
            id: id.to_string(),
            created_at: Some(created_at.to_rfc3339()),
            likes_count: Some(likes),
            comments_count: Some(comments),
            shares_count: Some(shares),
            saves_count: Some(saves),
        }
    }

    #[test]
    fn test_score_weights() {
        let now = fixed_now();
        // 超過 36 小時，沒有新鮮度加成
        let old = now - Duration::hours(48);
        let entry = score_post(&create_test_post("p", old, 1, 1, 1, 1), now);

        assert!((entry.score - (2.0 + 3.0 + 4.0 + 2.0)).abs() < 1e-9);
        assert_eq!(entry.engagement, 4);
        assert!((entry.age_hours - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_repost_outweighs_comment_outweighs_like() {
        let now = fixed_now();
        let old = now - Duration::hours(48);

        let repost = score_post(&create_test_post("r", old, 0, 0, 1, 0), now);
        let comment = score_post(&create_test_post("c", old, 0, 1, 0, 0), now);
        let like = score_post(&create_test_post("l", old, 1, 0, 0, 0), now);
        let save = score_post(&create_test_post("s", old, 0, 0, 0, 1), now);

        assert!(repost.score > comment.score);
        assert!(comment.score > like.score);
        assert_eq!(like.score, save.score);
    }

    #[test]
    fn test_freshness_boost_decay() {
        assert!((freshness_boost(0.0) - 6.0).abs() < 1e-9);
        assert!((freshness_boost(1.0) - 35.0 / 6.0).abs() < 1e-9);
        assert!((freshness_boost(18.0) - 3.0).abs() < 1e-9);
        assert_eq!(freshness_boost(36.0), 0.0);
        assert_eq!(freshness_boost(72.0), 0.0);
        assert_eq!(freshness_boost(INVALID_AGE_HOURS), 0.0);
    }

    #[test]
    fn test_unparseable_created_at_uses_sentinel_age() {
        let now = fixed_now();
        let post = FeedPost {
            id: "broken".to_string(),
            created_at: Some("yesterday-ish".to_string()),
            likes_count: Some(1),
            ..FeedPost::default()
        };

        let entry = score_post(&post, now);
        assert_eq!(entry.age_hours, INVALID_AGE_HOURS);
        assert!((entry.score - 2.0).abs() < 1e-9);
        assert_eq!(entry.reason, PriorityReason::WorthPrioritizing);

        let missing = FeedPost {
            id: "missing".to_string(),
            ..FeedPost::default()
        };
        assert_eq!(score_post(&missing, now).age_hours, INVALID_AGE_HOURS);
    }

    #[test]
    fn test_future_post_has_zero_age() {
        let now = fixed_now();
        let future = now + Duration::hours(3);
        let entry = score_post(&create_test_post("f", future, 0, 0, 0, 0), now);

        assert_eq!(entry.age_hours, 0.0);
        assert!((entry.score - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_reason_cascade_order() {
        // reposts 優先於 comments
        assert_eq!(
            classify_reason(100, 100, 3, 0.0),
            PriorityReason::FrequentlyReshared
        );
        assert_eq!(
            classify_reason(100, 4, 2, 0.0),
            PriorityReason::ActiveDiscussion
        );
        assert_eq!(
            classify_reason(8, 3, 2, 0.0),
            PriorityReason::HighPositiveResponse
        );
        assert_eq!(classify_reason(7, 3, 2, 6.0), PriorityReason::RecentPost);
        assert_eq!(
            classify_reason(7, 3, 2, 6.5),
            PriorityReason::WorthPrioritizing
        );
        assert_eq!(
            classify_reason(0, 0, 0, INVALID_AGE_HOURS),
            PriorityReason::WorthPrioritizing
        );
    }

    #[test]
    fn test_score_post_does_not_touch_input() {
        let now = fixed_now();
        let post = create_test_post("p", now, 5, 4, 3, 2);
        let before = post.clone();

        let entry = score_post(&post, now);
        assert_eq!(post, before);
        assert_eq!(entry.post, before);
    }
}
