use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("could not parse '{token}' as a price in input '{input}'")]
    InputParse { token: String, input: String },

    #[error("division by zero: {0}")]
    DivisionByZero(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SplitError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
