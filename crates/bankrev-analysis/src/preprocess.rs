//! Review text cleaning and deduplication.
//!
//! Cleaning strips everything outside word characters, whitespace, and basic
//! punctuation (emoji, decorative symbols), then collapses whitespace runs.
//! Deduplication keys on bank code + lowercased clean text, so reposts of
//! the same review under one bank collapse while the same text under two
//! banks survives.

use bankrev_core::{ProcessedReview, Review};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::error::AnalysisError;

/// Cleans raw review text and derives [`ProcessedReview`] records.
///
/// Compiles its patterns once in [`Preprocessor::new`]; construct a single
/// instance per run and reuse it.
pub struct Preprocessor {
    symbol_re: Regex,
    whitespace_re: Regex,
}

/// Result of one preprocessing pass: surviving records plus drop counters
/// for the end-of-stage summary log.
#[derive(Debug)]
pub struct PreprocessOutcome {
    pub processed: Vec<ProcessedReview>,
    /// Records whose text was empty after cleaning.
    pub dropped_empty: usize,
    /// Records removed as exact duplicates of an earlier record.
    pub dropped_duplicates: usize,
}

impl Preprocessor {
    /// # Errors
    ///
    /// Returns [`AnalysisError::Pattern`] if a cleaning regex fails to
    /// compile (static patterns; cannot fail in practice).
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            symbol_re: Regex::new(r"[^\w\s.,!?;:]")?,
            whitespace_re: Regex::new(r"\s+")?,
        })
    }

    /// Strips symbols/emoji and collapses whitespace. Returns an empty
    /// string for input with no retainable characters.
    #[must_use]
    pub fn clean_text(&self, text: &str) -> String {
        let stripped = self.symbol_re.replace_all(text, "");
        self.whitespace_re
            .replace_all(&stripped, " ")
            .trim()
            .to_string()
    }

    /// Derives [`ProcessedReview`] records from collected reviews.
    ///
    /// Exactly one processed record per input review, except:
    /// - records empty after cleaning are dropped (counted), and
    /// - exact duplicates (same bank + identical normalized text) are
    ///   dropped (counted), keeping the first occurrence.
    ///
    /// Idempotent: processing the output again yields the same set.
    #[must_use]
    pub fn process(&self, reviews: Vec<Review>) -> PreprocessOutcome {
        let mut processed = Vec::with_capacity(reviews.len());
        let mut seen_keys: HashSet<String> = HashSet::new();
        let mut dropped_empty = 0usize;
        let mut dropped_duplicates = 0usize;

        for review in reviews {
            let clean_content = self.clean_text(&review.content);
            if clean_content.is_empty() {
                dropped_empty += 1;
                tracing::debug!(
                    bank = %review.bank,
                    review_id = %review.source_review_id,
                    "dropping review with no text after cleaning"
                );
                continue;
            }

            let dedup_key = dedup_key(&review, &clean_content);
            if !seen_keys.insert(dedup_key.clone()) {
                dropped_duplicates += 1;
                continue;
            }

            processed.push(ProcessedReview {
                review,
                clean_content,
                dedup_key,
            });
        }

        PreprocessOutcome {
            processed,
            dropped_empty,
            dropped_duplicates,
        }
    }
}

/// Hex sha-256 over bank code and lowercased clean text, separated so
/// `("AB", "C")` and `("A", "BC")` cannot collide.
fn dedup_key(review: &Review, clean_content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(review.bank.as_str().as_bytes());
    hasher.update([0x1f]);
    hasher.update(clean_content.to_lowercase().as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankrev_core::BankCode;
    use chrono::NaiveDate;

    fn review(bank: BankCode, id: &str, content: &str) -> Review {
        Review {
            source_review_id: id.to_string(),
            bank,
            content: content.to_string(),
            rating: 3,
            reviewed_at: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            source_platform: "google_play".to_string(),
        }
    }

    fn preprocessor() -> Preprocessor {
        Preprocessor::new().unwrap()
    }

    #[test]
    fn clean_text_strips_emoji_and_collapses_whitespace() {
        let p = preprocessor();
        assert_eq!(
            p.clean_text("Great   app \u{1f600}\u{1f600}!!  Love it"),
            "Great app !! Love it"
        );
    }

    #[test]
    fn clean_text_keeps_basic_punctuation() {
        let p = preprocessor();
        assert_eq!(
            p.clean_text("Can't login; transfer failed, again?"),
            "Cant login; transfer failed, again?"
        );
    }

    #[test]
    fn clean_text_returns_empty_for_symbol_only_input() {
        let p = preprocessor();
        assert_eq!(p.clean_text("\u{2764}\u{fe0f} \u{1f44d} ** "), "");
    }

    #[test]
    fn process_derives_one_record_per_review() {
        let p = preprocessor();
        let outcome = p.process(vec![
            review(BankCode::Cbe, "gp:1", "good app"),
            review(BankCode::Cbe, "gp:2", "slow transfers"),
        ]);
        assert_eq!(outcome.processed.len(), 2);
        assert_eq!(outcome.dropped_empty, 0);
        assert_eq!(outcome.dropped_duplicates, 0);
    }

    #[test]
    fn process_drops_empty_records() {
        let p = preprocessor();
        let outcome = p.process(vec![
            review(BankCode::Cbe, "gp:1", "\u{1f44d}\u{1f44d}"),
            review(BankCode::Cbe, "gp:2", "fine"),
        ]);
        assert_eq!(outcome.processed.len(), 1);
        assert_eq!(outcome.dropped_empty, 1);
    }

    #[test]
    fn process_drops_same_bank_duplicates_keeping_first() {
        let p = preprocessor();
        let outcome = p.process(vec![
            review(BankCode::Boa, "gp:1", "Login failed again"),
            review(BankCode::Boa, "gp:2", "login FAILED again"),
        ]);
        assert_eq!(outcome.processed.len(), 1);
        assert_eq!(outcome.dropped_duplicates, 1);
        assert_eq!(outcome.processed[0].review.source_review_id, "gp:1");
    }

    #[test]
    fn process_keeps_identical_text_across_banks() {
        let p = preprocessor();
        let outcome = p.process(vec![
            review(BankCode::Cbe, "gp:1", "app keeps crashing"),
            review(BankCode::Boa, "gp:2", "app keeps crashing"),
        ]);
        assert_eq!(outcome.processed.len(), 2);
        assert_eq!(outcome.dropped_duplicates, 0);
    }

    #[test]
    fn process_is_idempotent() {
        let p = preprocessor();
        let first = p.process(vec![
            review(BankCode::Cbe, "gp:1", "good app"),
            review(BankCode::Cbe, "gp:2", "good  app"),
            review(BankCode::Dashen, "gp:3", "needs dark mode"),
        ]);
        let first_keys: Vec<String> = first
            .processed
            .iter()
            .map(|r| r.dedup_key.clone())
            .collect();

        let again = p.process(first.processed.into_iter().map(|r| r.review).collect());
        let again_keys: Vec<String> = again
            .processed
            .iter()
            .map(|r| r.dedup_key.clone())
            .collect();

        assert_eq!(first_keys, again_keys);
        assert_eq!(again.dropped_empty, 0);
        assert_eq!(again.dropped_duplicates, 0);
    }

    #[test]
    fn dedup_key_separates_bank_and_text() {
        let a = review(BankCode::Cbe, "gp:1", "x");
        let b = review(BankCode::Boa, "gp:2", "x");
        let p = preprocessor();
        let ka = dedup_key(&a, &p.clean_text(&a.content));
        let kb = dedup_key(&b, &p.clean_text(&b.content));
        assert_ne!(ka, kb);
    }
}
