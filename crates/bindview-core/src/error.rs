use thiserror::Error;

/// Failure from a [`ValueConverter`](crate::convert::ValueConverter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The converter does not implement this direction.
    #[error("{converter}: {operation} is not implemented")]
    Unsupported {
        converter: &'static str,
        operation: &'static str,
    },
}

impl ConvertError {
    #[must_use]
    pub fn unsupported(converter: &'static str, operation: &'static str) -> Self {
        Self::Unsupported {
            converter,
            operation,
        }
    }
}

/// A string did not name any [`Field`](crate::field::Field).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field name: {name}")]
pub struct FieldParseError {
    pub name: String,
}
