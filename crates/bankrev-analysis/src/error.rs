use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to compile cleaning pattern: {0}")]
    Pattern(#[from] regex::Error),
}
