use thiserror::Error;

use crate::schema::SchemaError;

/// Failure of an API call.
///
/// A response with `success: false` is not an error; it comes back as
/// data. Everything here aborts the call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request or the response did not match its shape.
    #[error("schema validation failed: {0}")]
    Schema(#[from] SchemaError),

    /// The HTTP exchange itself failed, including bodies that are not JSON.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A response passed validation but could not be converted to its type.
    #[error("failed to decode {shape}: {source}")]
    Decode {
        shape: &'static str,
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            ApiError::Schema(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
