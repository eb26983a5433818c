//! Boundary validation from raw wire records to [`bankrev_core::Review`].
//!
//! The listing's schema drifts record-to-record (missing text, withdrawn
//! ratings, two date formats), so every record is validated or coerced here
//! and malformed ones are rejected with a typed error the caller can count
//! and skip. Nothing downstream of this module sees an invalid record.

use bankrev_core::{BankCode, Review};
use chrono::{DateTime, NaiveDate};

use crate::error::ScraperError;
use crate::types::RawReview;

const SOURCE_PLATFORM: &str = "google_play";

/// Validates a raw record into a domain [`Review`] for the given bank.
///
/// # Errors
///
/// Returns [`ScraperError::Normalization`] if the record has no id, no text,
/// an out-of-range rating, or an unparseable submission date.
pub fn normalize_review(raw: RawReview, bank: BankCode) -> Result<Review, ScraperError> {
    let review_id = raw
        .review_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ScraperError::Normalization {
            review_id: "<missing>".to_owned(),
            reason: "record has no review id".to_owned(),
        })?
        .to_owned();

    let content = raw
        .content
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ScraperError::Normalization {
            review_id: review_id.clone(),
            reason: "record has no review text".to_owned(),
        })?
        .to_owned();

    let rating = match raw.score {
        Some(score @ 1..=5) => {
            // Range-checked above; fits i16 trivially.
            #[allow(clippy::cast_possible_truncation)]
            {
                score as i16
            }
        }
        Some(other) => {
            return Err(ScraperError::Normalization {
                review_id,
                reason: format!("rating {other} outside 1..=5"),
            })
        }
        None => {
            return Err(ScraperError::Normalization {
                review_id,
                reason: "record has no rating".to_owned(),
            })
        }
    };

    let reviewed_at = match raw.at.as_deref().map(str::trim) {
        Some(ts) if !ts.is_empty() => {
            parse_review_date(ts).ok_or_else(|| ScraperError::Normalization {
                review_id: review_id.clone(),
                reason: format!("unparseable date \"{ts}\""),
            })?
        }
        _ => {
            return Err(ScraperError::Normalization {
                review_id,
                reason: "record has no submission date".to_owned(),
            })
        }
    };

    Ok(Review {
        source_review_id: review_id,
        bank,
        content,
        rating,
        reviewed_at,
        source_platform: SOURCE_PLATFORM.to_owned(),
    })
}

/// Coerces either an RFC 3339 datetime or a bare `YYYY-MM-DD` date.
fn parse_review_date(ts: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(ts, "%Y-%m-%d").ok()
}
