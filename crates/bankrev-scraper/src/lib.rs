//! Review collection for bankrev.
//!
//! Fetches raw review records from the store's paginated reviews listing,
//! retries transient failures with exponential backoff, and validates each
//! record at the boundary before it becomes a domain [`bankrev_core::Review`].

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

mod retry;

pub use client::PlayReviewsClient;
pub use error::ScraperError;
pub use normalize::normalize_review;
pub use types::{RawReview, ReviewsPage};
