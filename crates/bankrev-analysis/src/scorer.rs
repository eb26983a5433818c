//! Lexicon sentiment model for mobile-banking review text.

use bankrev_core::Sentiment;

/// Word weights for the banking-review domain.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The summed score is clamped to
/// `[-1.0, 1.0]`.
const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("amazing", 0.5),
    ("best", 0.5),
    ("love", 0.5),
    ("like", 0.2),
    ("easy", 0.4),
    ("fast", 0.4),
    ("simple", 0.3),
    ("smooth", 0.4),
    ("reliable", 0.4),
    ("convenient", 0.4),
    ("helpful", 0.3),
    ("secure", 0.3),
    ("nice", 0.3),
    ("perfect", 0.5),
    ("thanks", 0.3),
    ("improved", 0.3),
    ("works", 0.2),
    // Negative signals
    ("bad", -0.4),
    ("worst", -0.6),
    ("terrible", -0.6),
    ("horrible", -0.6),
    ("useless", -0.6),
    ("slow", -0.4),
    ("crash", -0.5),
    ("crashes", -0.5),
    ("fail", -0.4),
    ("failed", -0.4),
    ("failure", -0.4),
    ("error", -0.3),
    ("stuck", -0.4),
    ("broken", -0.5),
    ("annoying", -0.4),
    ("frustrating", -0.5),
    ("problem", -0.3),
    ("issue", -0.3),
    ("disappointing", -0.5),
    ("waste", -0.5),
    ("never", -0.2),
    ("cant", -0.2),
];

/// Score at or below which a polar label is not assigned.
const NEUTRAL_BAND: f32 = 0.15;

/// Cleaned text shorter than this is the `unclassified` sentinel.
const MIN_CLASSIFIABLE_CHARS: usize = 3;

/// The fixed word-weight lexicon, wrapped as an explicitly constructed
/// dependency: load once at startup, pass by reference, drop at exit.
pub struct SentimentModel {
    lexicon: &'static [(&'static str, f32)],
}

impl SentimentModel {
    #[must_use]
    pub fn load() -> Self {
        Self { lexicon: LEXICON }
    }

    /// Score a text string using the domain lexicon.
    ///
    /// Splits text into lowercase words, sums matching weights, and clamps
    /// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
    #[must_use]
    pub fn score(&self, text: &str) -> f32 {
        let mut score = 0.0_f32;
        for word in text.split_whitespace() {
            let w = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            for &(lex_word, weight) in self.lexicon {
                if w == lex_word {
                    score += weight;
                    break;
                }
            }
        }
        score.clamp(-1.0, 1.0)
    }

    /// Classify cleaned review text into a label and confidence.
    ///
    /// Labels: score above `+0.15` is positive, below `-0.15` negative,
    /// otherwise neutral. Confidence is `|score|` for polar labels and
    /// `1 - |score|` for neutral. Input shorter than 3 characters gets the
    /// `Unclassified` sentinel with confidence `0.0` instead of an error.
    #[must_use]
    pub fn classify(&self, text: &str) -> (Sentiment, f32) {
        if text.trim().len() < MIN_CLASSIFIABLE_CHARS {
            return (Sentiment::Unclassified, 0.0);
        }

        let score = self.score(text);
        if score > NEUTRAL_BAND {
            (Sentiment::Positive, score.abs())
        } else if score < -NEUTRAL_BAND {
            (Sentiment::Negative, score.abs())
        } else {
            (Sentiment::Neutral, 1.0 - score.abs())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> SentimentModel {
        SentimentModel::load()
    }

    #[test]
    fn empty_string_scores_zero() {
        assert_eq!(model().score(""), 0.0);
    }

    #[test]
    fn unknown_text_scores_zero() {
        assert_eq!(model().score("the quick brown fox"), 0.0);
    }

    #[test]
    fn positive_keyword_scores_positive() {
        let score = model().score("this app is great");
        assert!(score > 0.0, "expected positive score, got {score}");
    }

    #[test]
    fn negative_keyword_scores_negative() {
        let score = model().score("transfer failed");
        assert!(score < 0.0, "expected negative score, got {score}");
    }

    #[test]
    fn score_clamps_to_positive_one() {
        let text = "great excellent best love perfect easy fast smooth reliable";
        assert_eq!(model().score(text), 1.0);
    }

    #[test]
    fn score_clamps_to_negative_one() {
        let text = "worst terrible horrible useless broken frustrating waste crash";
        assert_eq!(model().score(text), -1.0);
    }

    #[test]
    fn punctuation_is_stripped_from_words() {
        let score = model().score("great!");
        assert!(score > 0.0, "expected positive score for 'great!', got {score}");
    }

    #[test]
    fn classify_labels_are_three_way_on_classifiable_input() {
        let m = model();
        for text in [
            "great app, love it",
            "the update changed the menu layout",
            "worst app, crashes constantly",
        ] {
            let (label, confidence) = m.classify(text);
            assert!(
                matches!(
                    label,
                    Sentiment::Positive | Sentiment::Neutral | Sentiment::Negative
                ),
                "unexpected label {label} for {text:?}"
            );
            assert!((0.0..=1.0).contains(&confidence));
        }
    }

    #[test]
    fn classify_positive_review() {
        let (label, confidence) = model().classify("excellent app, easy and fast");
        assert_eq!(label, Sentiment::Positive);
        assert!(confidence > 0.5);
    }

    #[test]
    fn classify_negative_review() {
        let (label, confidence) = model().classify("terrible, transfer failed and app crashes");
        assert_eq!(label, Sentiment::Negative);
        assert!(confidence > 0.5);
    }

    #[test]
    fn classify_neutral_for_unopinionated_text() {
        let (label, confidence) = model().classify("opened an account last month");
        assert_eq!(label, Sentiment::Neutral);
        assert!(confidence >= 0.85);
    }

    #[test]
    fn classify_mixed_text_lands_in_neutral_band() {
        // good (+0.3) + slow (-0.4) = -0.1, inside the band.
        let (label, _) = model().classify("good app but slow");
        assert_eq!(label, Sentiment::Neutral);
    }

    #[test]
    fn classify_short_input_is_unclassified_sentinel() {
        let (label, confidence) = model().classify("ok");
        assert_eq!(label, Sentiment::Unclassified);
        assert_eq!(confidence, 0.0);
    }

    #[test]
    fn classify_empty_input_is_unclassified_sentinel() {
        let (label, confidence) = model().classify("");
        assert_eq!(label, Sentiment::Unclassified);
        assert_eq!(confidence, 0.0);
    }

    #[test]
    fn classify_agrees_with_rating_polarity_scenario() {
        // Three reviews for one bank rated [5, 5, 1]: the two five-star
        // texts read positive, the one-star text reads negative.
        let m = model();
        let (five_a, _) = m.classify("great app, fast and reliable");
        let (five_b, _) = m.classify("love it, easy to use");
        let (one, _) = m.classify("useless app, login failed");
        assert_eq!(five_a, Sentiment::Positive);
        assert_eq!(five_b, Sentiment::Positive);
        assert_eq!(one, Sentiment::Negative);
    }
}
