//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid arguments and geometry, malformed catalog data, JSON decoding, IO, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn invalid_argument_message_is_prefixed() {
        let err = Error::InvalidArgument("modulus must be > 0".into());
        assert_eq!(err.to_string(), "invalid argument: modulus must be > 0");
    }

    #[test]
    fn json_errors_convert_transparently() {
        let parse = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
