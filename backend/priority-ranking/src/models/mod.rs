use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::utils::parse_timestamp;

/// Post row as delivered by the feed data source.
///
/// Decoding is per field and never rejects a row: a numeric id becomes its
/// string form, counters that are not non-negative integers read as zero and
/// a `created_at` that is not a string is treated as unparseable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPost {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_counter")]
    pub likes_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_counter")]
    pub comments_count: Option<u64>,
    /// Repost counter
    #[serde(default, deserialize_with = "lenient_counter")]
    pub shares_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_counter")]
    pub saves_count: Option<u64>,
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(ts) => Some(ts),
        _ => None,
    })
}

fn lenient_counter<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        _ => None,
    })
}

impl FeedPost {
    pub fn new(id: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Some(created_at.into()),
            ..Self::default()
        }
    }

    /// Whether the id survives trimming; posts failing this are never ranked
    pub fn has_valid_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    pub fn likes(&self) -> u64 {
        self.likes_count.unwrap_or(0)
    }

    pub fn comments(&self) -> u64 {
        self.comments_count.unwrap_or(0)
    }

    pub fn reposts(&self) -> u64 {
        self.shares_count.unwrap_or(0)
    }

    pub fn saves(&self) -> u64 {
        self.saves_count.unwrap_or(0)
    }

    /// Sum of the four raw counters
    pub fn engagement(&self) -> u64 {
        self.likes()
            .saturating_add(self.comments())
            .saturating_add(self.reposts())
            .saturating_add(self.saves())
    }

    /// Parsed `created_at`, `None` when missing or unparseable
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

/// Feed ordering strategy.
///
/// Parsing never fails: anything other than `latest` or `discussed` ranks as `Hot`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RankingMode {
    /// Engagement-weighted score with freshness boost
    #[default]
    Hot,
    /// Newest first, engagement ignored
    Latest,
    /// Most commented first
    Discussed,
}

impl RankingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMode::Hot => "hot",
            RankingMode::Latest => "latest",
            RankingMode::Discussed => "discussed",
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for RankingMode {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "latest" => RankingMode::Latest,
            "discussed" => RankingMode::Discussed,
            _ => RankingMode::Hot,
        }
    }
}

impl From<String> for RankingMode {
    fn from(value: String) -> Self {
        RankingMode::from(value.as_str())
    }
}

impl FromStr for RankingMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RankingMode::from(s))
    }
}

/// Why a post was prioritized, shown to readers as a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityReason {
    FrequentlyReshared,
    ActiveDiscussion,
    HighPositiveResponse,
    RecentPost,
    WorthPrioritizing,
}

impl PriorityReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityReason::FrequentlyReshared => "frequently_reshared",
            PriorityReason::ActiveDiscussion => "active_discussion",
            PriorityReason::HighPositiveResponse => "high_positive_response",
            PriorityReason::RecentPost => "recent_post",
            PriorityReason::WorthPrioritizing => "worth_prioritizing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityReason::FrequentlyReshared => "Frequently reshared",
            PriorityReason::ActiveDiscussion => "Active discussion",
            PriorityReason::HighPositiveResponse => "High positive response",
            PriorityReason::RecentPost => "Recent post",
            PriorityReason::WorthPrioritizing => "Worth prioritizing",
        }
    }
}

impl fmt::Display for PriorityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One ranked post with the values that placed it
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub post: FeedPost,
    pub score: f64,
    pub engagement: u64,
    /// Hours since `created_at`; `INVALID_AGE_HOURS` when unparseable
    pub age_hours: f64,
    pub reason: PriorityReason,
}

impl Serialize for RankedEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("RankedEntry", 6)?;
        state.serialize_field("post", &self.post)?;
        state.serialize_field("score", &self.score)?;
        state.serialize_field("engagement", &self.engagement)?;
        state.serialize_field("ageHours", &self.age_hours)?;
        state.serialize_field("reason", &self.reason)?;
        state.serialize_field("reasonLabel", self.reason.label())?;
        state.end()
    }
}
