//! HTTP client for the store's paginated reviews listing.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::retry::retry_with_backoff;
use crate::types::{RawReview, ReviewsPage};

/// Maximum number of pages to fetch before returning an error.
/// Prevents infinite loops on cycling continuation tokens.
///
/// Note: each page request may be retried up to `max_retries` times on
/// transient errors, so the effective worst-case request count is
/// `MAX_PAGES * (1 + max_retries)`.
const MAX_PAGES: usize = 500;

/// HTTP client for the store's public reviews listing.
///
/// Handles rate limiting (429), not-found (404), and other non-2xx responses
/// as typed errors. Pages are chained through the `nextPageToken` field of
/// each response body.
///
/// Transient errors (429, network failures, 5xx) are automatically retried
/// with exponential backoff up to `max_retries` additional attempts.
///
/// Constructed once at startup and reused read-only for the whole run.
pub struct PlayReviewsClient {
    client: Client,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl PlayReviewsClient {
    /// Creates a `PlayReviewsClient` with configured timeout, `User-Agent`,
    /// and retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for retriable errors. Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches one page of reviews for an app, with automatic retry on
    /// transient errors.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`ScraperError::NotFound`] — HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status
    ///   (5xx retried, 4xx not).
    /// - [`ScraperError::Http`] — network or TLS failure after all retries.
    /// - [`ScraperError::Deserialize`] — response body is not a valid page
    ///   (not retried).
    pub async fn fetch_reviews_page(
        &self,
        base_url: &str,
        app_id: &str,
        page_size: u32,
        token: Option<&str>,
    ) -> Result<ReviewsPage, ScraperError> {
        let url = Self::reviews_url(base_url, app_id, page_size, token)?;
        let max_retries = self.max_retries;
        let backoff_base_secs = self.backoff_base_secs;

        retry_with_backoff(max_retries, backoff_base_secs, || {
            let url = url.clone();
            let app_id = app_id.to_owned();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);

                    return Err(ScraperError::RateLimited {
                        app_id,
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response.text().await?;
                let parsed = serde_json::from_str::<ReviewsPage>(&body).map_err(|e| {
                    ScraperError::Deserialize {
                        context: format!("reviews page for {app_id}"),
                        source: e,
                    }
                })?;

                Ok(parsed)
            }
        })
        .await
    }

    /// Fetches raw reviews for an app until `target_count` records are
    /// collected or the listing is exhausted.
    ///
    /// `inter_request_delay_ms` is the politeness delay between page requests
    /// (applied after every page except the first).
    ///
    /// **All-or-nothing semantics**: on any page failure, already-fetched
    /// records from earlier pages are discarded and the error is returned;
    /// a partial listing would skew the per-bank aggregates it feeds.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_reviews_page`]. Returns
    /// [`ScraperError::PaginationLimit`] if the number of pages exceeds the
    /// internal cap.
    pub async fn fetch_reviews(
        &self,
        base_url: &str,
        app_id: &str,
        target_count: usize,
        page_size: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<RawReview>, ScraperError> {
        let mut collected: Vec<RawReview> = Vec::new();
        let mut token: Option<String> = None;
        let mut is_first_page = true;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(ScraperError::PaginationLimit {
                    app_id: app_id.to_owned(),
                    max_pages: MAX_PAGES,
                });
            }

            if !is_first_page && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }
            is_first_page = false;

            let page = self
                .fetch_reviews_page(base_url, app_id, page_size, token.as_deref())
                .await?;

            let page_was_empty = page.reviews.is_empty();
            collected.extend(page.reviews);

            if collected.len() >= target_count {
                collected.truncate(target_count);
                break;
            }

            token = page.next_page_token;
            if token.is_none() || page_was_empty {
                break;
            }
        }

        Ok(collected)
    }

    /// Builds the reviews URL for the given app, page size, and optional
    /// continuation token.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` cannot be
    /// parsed as a URL base.
    fn reviews_url(
        base_url: &str,
        app_id: &str,
        page_size: u32,
        token: Option<&str>,
    ) -> Result<String, ScraperError> {
        let base = format!("{}/apps/{app_id}/reviews", base_url.trim_end_matches('/'));
        let mut url = reqwest::Url::parse(&base).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut().append_pair("hl", "en");
        url.query_pairs_mut()
            .append_pair("count", &page_size.to_string());

        if let Some(cursor) = token {
            url.query_pairs_mut().append_pair("token", cursor);
        }

        Ok(url.to_string())
    }
}
