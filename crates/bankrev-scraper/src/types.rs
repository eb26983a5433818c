//! Wire types for the store's paginated reviews listing.
//!
//! ## Observed shape
//!
//! The listing returns one JSON page per request:
//!
//! ```json
//! {
//!   "reviews": [
//!     {
//!       "reviewId": "gp:AOqpTOE...",
//!       "content": "Love the new transfer screen",
//!       "score": 5,
//!       "at": "2024-11-02T09:14:00Z",
//!       "userName": "A. Bekele",
//!       "thumbsUpCount": 3
//!     }
//!   ],
//!   "nextPageToken": "CqgBCg..."
//! }
//! ```
//!
//! Field presence varies by record: old records may omit `content` or `at`,
//! and `score` has been observed as `0` on withdrawn ratings. Every field a
//! record might omit is therefore `Option` with a serde default, and the
//! decision to accept or reject a record lives in `normalize.rs`, never in
//! the deserializer.
//!
//! `at` is usually an RFC 3339 datetime but plain `YYYY-MM-DD` dates appear
//! on records migrated from an older listing format; both are coerced.

use serde::Deserialize;

/// One page of the reviews listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsPage {
    #[serde(default)]
    pub reviews: Vec<RawReview>,

    /// Continuation token for the next page; absent or `null` on the last
    /// page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A single raw review record, prior to boundary validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    /// Store-assigned review identifier. Required downstream; records
    /// without one are skipped during normalization.
    #[serde(default)]
    pub review_id: Option<String>,

    /// Review body text. May be absent or empty on rating-only records.
    #[serde(default)]
    pub content: Option<String>,

    /// Star rating. Expected in `1..=5`; `0` observed on withdrawn ratings.
    #[serde(default)]
    pub score: Option<i64>,

    /// Submission time, RFC 3339 or bare `YYYY-MM-DD`.
    #[serde(default)]
    pub at: Option<String>,

    /// Reviewer display name. Unused by the pipeline; kept for completeness
    /// of the wire shape.
    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub thumbs_up_count: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_deserializes_with_all_fields() {
        let json = r#"{
            "reviews": [{
                "reviewId": "gp:1",
                "content": "great app",
                "score": 5,
                "at": "2024-11-02T09:14:00Z",
                "userName": "A. Bekele",
                "thumbsUpCount": 3
            }],
            "nextPageToken": "tok-2"
        }"#;
        let page: ReviewsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.reviews.len(), 1);
        assert_eq!(page.next_page_token.as_deref(), Some("tok-2"));
        let raw = &page.reviews[0];
        assert_eq!(raw.review_id.as_deref(), Some("gp:1"));
        assert_eq!(raw.score, Some(5));
    }

    #[test]
    fn page_tolerates_missing_fields() {
        let json = r#"{"reviews": [{}]}"#;
        let page: ReviewsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.reviews.len(), 1);
        assert!(page.next_page_token.is_none());
        let raw = &page.reviews[0];
        assert!(raw.review_id.is_none());
        assert!(raw.content.is_none());
        assert!(raw.score.is_none());
        assert!(raw.at.is_none());
    }

    #[test]
    fn page_tolerates_null_token() {
        let json = r#"{"reviews": [], "nextPageToken": null}"#;
        let page: ReviewsPage = serde_json::from_str(json).unwrap();
        assert!(page.reviews.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
