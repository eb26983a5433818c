use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod app_config;
pub mod banks;
pub mod config;
pub mod themes;

pub use app_config::AppConfig;
pub use banks::{load_banks, BankCode, BankEntry, BanksFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use themes::{load_themes, ThemeEntry, ThemesFile};

/// A single user-submitted review of one bank's mobile app, as collected
/// from the store listing.
///
/// Identity is `(bank, source_review_id)`; the same store id under two
/// different banks names two distinct reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Review identifier assigned by the store.
    pub source_review_id: String,
    pub bank: BankCode,
    /// Raw review text as submitted by the user.
    pub content: String,
    /// Star rating, always in `1..=5` after collection-boundary validation.
    pub rating: i16,
    pub reviewed_at: NaiveDate,
    /// Listing the review was collected from, e.g. `"google_play"`.
    pub source_platform: String,
}

/// A [`Review`] plus its cleaned text and deduplication key.
#[derive(Debug, Clone)]
pub struct ProcessedReview {
    pub review: Review,
    /// Text with symbols/emoji stripped and whitespace collapsed.
    pub clean_content: String,
    /// Hex sha-256 over bank code + normalized text. Two processed reviews
    /// with equal keys are exact duplicates.
    pub dedup_key: String,
}

/// Coarse polarity label assigned to a review.
///
/// `Unclassified` is the sentinel for input the model refuses (e.g. cleaned
/// text too short to score); it never aborts a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Unclassified,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment label, confidence, and theme tags derived for exactly one
/// [`ProcessedReview`]. Never mutated after creation; re-runs replace the
/// stored copy wholesale via upsert.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub sentiment: Sentiment,
    /// Model confidence in `[0.0, 1.0]`. `0.0` for `Unclassified`.
    pub confidence: f32,
    /// Zero or more theme names from the configured keyword table.
    pub themes: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_labels_serialize_lowercase() {
        let json = serde_json::to_string(&Sentiment::Positive).unwrap();
        assert_eq!(json, "\"positive\"");
        let json = serde_json::to_string(&Sentiment::Unclassified).unwrap();
        assert_eq!(json, "\"unclassified\"");
    }

    #[test]
    fn sentiment_display_matches_as_str() {
        for s in [
            Sentiment::Positive,
            Sentiment::Neutral,
            Sentiment::Negative,
            Sentiment::Unclassified,
        ] {
            assert_eq!(s.to_string(), s.as_str());
        }
    }
}
