//! Text analysis pipeline for bankrev.
//!
//! Cleans and deduplicates collected reviews, scores them with a fixed
//! banking-domain lexicon, and tags themes by keyword match. The sentiment
//! model and theme table are constructed once at startup and passed by
//! reference for the whole run.

pub mod analyzer;
pub mod error;
pub mod preprocess;
pub mod scorer;
pub mod themes;

pub use analyzer::Analyzer;
pub use error::AnalysisError;
pub use preprocess::{PreprocessOutcome, Preprocessor};
pub use scorer::SentimentModel;
pub use themes::ThemeTable;
