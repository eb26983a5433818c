//! Annotation of processed reviews: sentiment label + theme tags.

use bankrev_core::{Annotation, ProcessedReview};

use crate::scorer::SentimentModel;
use crate::themes::ThemeTable;

/// Combines the sentiment model and theme table into the per-review
/// annotation step. Deterministic given a fixed lexicon and keyword table.
pub struct Analyzer<'a> {
    model: &'a SentimentModel,
    themes: &'a ThemeTable,
}

impl<'a> Analyzer<'a> {
    #[must_use]
    pub fn new(model: &'a SentimentModel, themes: &'a ThemeTable) -> Self {
        Self { model, themes }
    }

    /// Produces exactly one [`Annotation`] for a processed review.
    ///
    /// Unclassifiable text (too short after cleaning) yields the
    /// `unclassified` sentinel label; theme extraction still runs so even
    /// a sentinel row keeps its tags.
    #[must_use]
    pub fn annotate(&self, processed: &ProcessedReview) -> Annotation {
        let (sentiment, confidence) = self.model.classify(&processed.clean_content);
        let themes = self.themes.extract(&processed.clean_content);

        Annotation {
            sentiment,
            confidence,
            themes,
        }
    }

    /// Annotates a batch, pairing each processed review with its annotation.
    #[must_use]
    pub fn annotate_all(
        &self,
        processed: Vec<ProcessedReview>,
    ) -> Vec<(ProcessedReview, Annotation)> {
        processed
            .into_iter()
            .map(|p| {
                let annotation = self.annotate(&p);
                (p, annotation)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankrev_core::{BankCode, Review, Sentiment, ThemeEntry, ThemesFile};
    use chrono::NaiveDate;

    fn processed(content: &str) -> ProcessedReview {
        ProcessedReview {
            review: Review {
                source_review_id: "gp:1".to_string(),
                bank: BankCode::Cbe,
                content: content.to_string(),
                rating: 3,
                reviewed_at: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                source_platform: "google_play".to_string(),
            },
            clean_content: content.to_string(),
            dedup_key: "k".to_string(),
        }
    }

    fn theme_table() -> ThemeTable {
        ThemeTable::from_config(&ThemesFile {
            themes: vec![ThemeEntry {
                name: "Login Problems".to_string(),
                keywords: vec!["login".to_string()],
            }],
        })
    }

    #[test]
    fn annotate_produces_label_and_themes() {
        let model = SentimentModel::load();
        let themes = theme_table();
        let analyzer = Analyzer::new(&model, &themes);

        let annotation = analyzer.annotate(&processed("login failed, terrible app"));
        assert_eq!(annotation.sentiment, Sentiment::Negative);
        assert_eq!(annotation.themes, vec!["Login Problems".to_string()]);
        assert!(annotation.confidence > 0.0);
    }

    #[test]
    fn annotate_keeps_themes_on_unclassified_sentinel() {
        let model = SentimentModel::load();
        // A table whose keyword can match even two-character input.
        let themes = ThemeTable::from_config(&ThemesFile {
            themes: vec![ThemeEntry {
                name: "App Performance".to_string(),
                keywords: vec!["gg".to_string()],
            }],
        });
        let analyzer = Analyzer::new(&model, &themes);

        // Too short to classify, but theme extraction still runs.
        let annotation = analyzer.annotate(&processed("gg"));
        assert_eq!(annotation.sentiment, Sentiment::Unclassified);
        assert_eq!(annotation.confidence, 0.0);
        assert_eq!(annotation.themes, vec!["App Performance".to_string()]);
    }

    #[test]
    fn annotate_all_pairs_every_input() {
        let model = SentimentModel::load();
        let themes = theme_table();
        let analyzer = Analyzer::new(&model, &themes);

        let pairs = analyzer.annotate_all(vec![
            processed("great app, love it"),
            processed("worst app, crashes constantly"),
        ]);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].1.sentiment, Sentiment::Positive);
        assert_eq!(pairs[1].1.sentiment, Sentiment::Negative);
    }

    #[test]
    fn annotate_is_deterministic() {
        let model = SentimentModel::load();
        let themes = theme_table();
        let analyzer = Analyzer::new(&model, &themes);
        let p = processed("login is slow but works");

        let a = analyzer.annotate(&p);
        let b = analyzer.annotate(&p);
        assert_eq!(a.sentiment, b.sentiment);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.themes, b.themes);
    }
}
