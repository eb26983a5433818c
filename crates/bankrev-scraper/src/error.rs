use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited fetching reviews for {app_id} (retry after {retry_after_secs}s)")]
    RateLimited {
        app_id: String,
        retry_after_secs: u64,
    },

    #[error("reviews listing not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("malformed review record {review_id}: {reason}")]
    Normalization { review_id: String, reason: String },

    #[error("pagination limit reached for {app_id}: exceeded {max_pages} pages")]
    PaginationLimit { app_id: String, max_pages: usize },

    #[error("invalid store base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
