use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid decimal amount {input:?}: {source}")]
    InvalidDecimal {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("invalid log filter {filter:?}: {message}")]
    InvalidLogFilter { filter: String, message: String },

    #[error("failed to install log subscriber: {message}")]
    LoggingInit { message: String },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidDecimal { .. } | Self::InvalidLogFilter { .. } => 2,
            Self::LoggingInit { .. } => 1,
        }
    }
}
