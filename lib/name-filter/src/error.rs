use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Filter expression must not be empty")]
    EmptyFilter,

    #[error("Compiled filter pattern must not be empty")]
    EmptyPattern,

    #[error("Invalid data set range: minimum={minimum}, maximum={maximum}")]
    InvalidDataSetRange { minimum: i64, maximum: i64 },

    #[error("Unknown filter syntax: {0}")]
    UnknownSyntax(String),

    #[error("Failed to read filter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
