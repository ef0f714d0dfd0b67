use arbor_value::NumberParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("invalid json: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("invalid number: {0}")]
    InvalidNumber(#[from] NumberParseError),
}
