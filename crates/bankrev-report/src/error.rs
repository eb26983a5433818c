use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error(transparent)]
    Db(#[from] bankrev_db::DbError),
}
