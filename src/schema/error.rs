use std::fmt;
use thiserror::Error;

/// Why a value failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The key is missing from the object.
    Undefined,
    /// The key is present with a `null` value where null is not allowed.
    Null,
    /// The JSON value has the wrong type for the field.
    InvalidType,
    TooShort,
    TooLong,
    BelowMinimum,
    AboveMaximum,
    InvalidFormat,
}

impl Violation {
    /// Short machine-friendly reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Violation::Undefined => "undefined",
            Violation::Null => "null",
            Violation::InvalidType => "invalid type",
            Violation::TooShort => "too short",
            Violation::TooLong => "too long",
            Violation::BelowMinimum => "below minimum",
            Violation::AboveMaximum => "above maximum",
            Violation::InvalidFormat => "invalid format",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Undefined => f.write_str("is undefined"),
            Violation::Null => f.write_str("is null"),
            Violation::InvalidType => f.write_str("has an invalid type"),
            Violation::TooShort => f.write_str("is too short"),
            Violation::TooLong => f.write_str("is too long"),
            Violation::BelowMinimum => f.write_str("has a value below minimum"),
            Violation::AboveMaximum => f.write_str("has a value above maximum"),
            Violation::InvalidFormat => f.write_str("has an invalid format"),
        }
    }
}

/// A payload did not match its declared shape.
///
/// `path` names the offending field starting from the shape name, e.g.
/// `SessionsResponse.sessions[0].time.end`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path} {violation}")]
pub struct SchemaError {
    pub path: String,
    pub violation: Violation,
}

impl SchemaError {
    pub fn new(path: impl Into<String>, violation: Violation) -> Self {
        Self {
            path: path.into(),
            violation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reads_like_a_sentence() {
        let err = SchemaError::new("LoginRequest.username", Violation::TooShort);
        assert_eq!(err.to_string(), "LoginRequest.username is too short");

        let err = SchemaError::new("QuotaResponse.max", Violation::BelowMinimum);
        assert_eq!(err.to_string(), "QuotaResponse.max has a value below minimum");
        assert_eq!(err.violation.reason(), "below minimum");
    }
}
