//! Feed input adapter
//!
//! Decodes post rows handed over by the feed data source. Accepts a bare JSON
//! array or an envelope carrying the rows under `posts` or `data`.

use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{RankingError, Result};
use crate::models::FeedPost;

/// Envelope keys checked, in order, when the payload is an object
const ENVELOPE_KEYS: [&str; 2] = ["posts", "data"];

fn take_rows(payload: Value) -> Result<Vec<Value>> {
    match payload {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut envelope) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| match envelope.remove(*key) {
                Some(Value::Array(rows)) => Some(rows),
                _ => None,
            })
            .ok_or_else(|| {
                RankingError::InvalidPayload(
                    "expected a `posts` or `data` array in the envelope".to_string(),
                )
            }),
        other => Err(RankingError::InvalidPayload(format!(
            "expected an array of posts, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode posts from any reader.
///
/// Malformed fields degrade inside each row; rows that are not JSON objects
/// are skipped with a warning.
pub fn read_posts<R: Read>(reader: R) -> Result<Vec<FeedPost>> {
    let payload: Value = serde_json::from_reader(reader)?;
    let rows = take_rows(payload)?;
    let total = rows.len();

    let posts: Vec<FeedPost> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            if !row.is_object() {
                warn!(row = index, kind = json_kind(&row), "Skipping non-object feed row");
                return None;
            }
            match serde_json::from_value::<FeedPost>(row) {
                Ok(post) => Some(post),
                Err(e) => {
                    warn!(row = index, error = %e, "Skipping undecodable feed row");
                    None
                }
            }
        })
        .collect();

    debug!(count = posts.len(), skipped = total - posts.len(), "Decoded feed posts");
    Ok(posts)
}

/// Decode posts from a JSON file
pub fn read_posts_from_path(path: impl AsRef<Path>) -> Result<Vec<FeedPost>> {
    let file = File::open(path.as_ref())?;
    read_posts(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bare_array() {
        let json = r#"[{"id": "a", "likes_count": 1}, {"id": "b"}]"#;
        let posts = read_posts(json.as_bytes()).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].likes(), 1);
    }

    #[test]
    fn test_read_envelopes() {
        let posts = read_posts(r#"{"posts": [{"id": "a"}]}"#.as_bytes()).unwrap();
        assert_eq!(posts[0].id, "a");

        let posts = read_posts(r#"{"data": [{"id": "b"}], "error": null}"#.as_bytes()).unwrap();
        assert_eq!(posts[0].id, "b");
    }

    #[test]
    fn test_read_invalid_json() {
        let err = read_posts("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, RankingError::InvalidInput(_)));

        let err = read_posts(r#"{"rows": []}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, RankingError::InvalidPayload(_)));

        let err = read_posts("42".as_bytes()).unwrap_err();
        assert!(matches!(err, RankingError::InvalidPayload(_)));
    }

    #[test]
    fn test_malformed_row_does_not_sink_the_feed() {
        let json = r#"[
            {"id": 42, "created_at": 1771502400000, "likes_count": -1, "comments_count": "5"},
            {"id": "ok", "created_at": "2026-02-19T11:00:00Z", "likes_count": 3}
        ]"#;

        let posts = read_posts(json.as_bytes()).unwrap();
        assert_eq!(posts.len(), 2);

        assert_eq!(posts[0].id, "42");
        assert_eq!(posts[0].created_at, None);
        assert_eq!(posts[0].likes(), 0);
        assert_eq!(posts[0].comments(), 0);

        assert_eq!(posts[1].id, "ok");
        assert_eq!(posts[1].likes(), 3);
        assert!(posts[1].created_at_utc().is_some());
    }

    #[test]
    fn test_non_object_rows_are_skipped() {
        let json = r#"{"data": [7, "text", null, ["positional"], {"id": "kept"}]}"#;
        let posts = read_posts(json.as_bytes()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "kept");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_posts_from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, RankingError::Io(_)));
    }
}
