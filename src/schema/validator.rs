//! Generic structural validation of JSON values against [`Shape`]s.
//!
//! Every field goes through the same checks in the same order: presence,
//! nullability, JSON type, then the refinements declared on its [`Kind`].
//! Lists apply the element kind to every item and nested objects recurse
//! into their own shape, extending the reported path as they go.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::descriptor::{Field, Format, Kind, Shape};
use super::error::{SchemaError, Violation};

static ISO_DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(\+[0-9]{2}:[0-9]{2}|Z)$",
    )
    .expect("ISO date-time pattern is valid")
});

/// Validate `value` against `shape`.
///
/// The value is only read. On failure the error names the first offending
/// field, rooted at `shape.name`.
pub fn validate(shape: &Shape, value: &Value) -> Result<(), SchemaError> {
    validate_object(shape, value, shape.name)
}

/// Check a string against a declared format.
pub fn matches_format(format: Format, value: &str) -> bool {
    match format {
        Format::IsoDateTime => ISO_DATE_TIME.is_match(value),
    }
}

fn validate_object(shape: &Shape, value: &Value, path: &str) -> Result<(), SchemaError> {
    let Some(object) = value.as_object() else {
        return Err(SchemaError::new(path, Violation::InvalidType));
    };

    for field in shape.fields {
        validate_field(field, object, &format!("{}.{}", path, field.name))?;
    }

    Ok(())
}

fn validate_field(field: &Field, object: &Map<String, Value>, path: &str) -> Result<(), SchemaError> {
    match object.get(field.name) {
        None => Err(SchemaError::new(path, Violation::Undefined)),
        Some(Value::Null) if field.nullable => Ok(()),
        Some(value) => validate_value(&field.kind, value, path),
    }
}

fn validate_value(kind: &Kind, value: &Value, path: &str) -> Result<(), SchemaError> {
    match (kind, value) {
        (_, Value::Null) => Err(SchemaError::new(path, Violation::Null)),

        (Kind::Boolean, Value::Bool(_)) => Ok(()),

        (Kind::Integer { min, max }, Value::Number(number)) => {
            let Some(n) = number.as_i64() else {
                return Err(SchemaError::new(path, Violation::InvalidType));
            };
            if min.is_some_and(|min| n < min) {
                return Err(SchemaError::new(path, Violation::BelowMinimum));
            }
            if max.is_some_and(|max| n > max) {
                return Err(SchemaError::new(path, Violation::AboveMaximum));
            }
            Ok(())
        }

        (
            Kind::String {
                min_len,
                max_len,
                format,
            },
            Value::String(s),
        ) => {
            let len = s.chars().count();
            if min_len.is_some_and(|min| len < min) {
                return Err(SchemaError::new(path, Violation::TooShort));
            }
            if max_len.is_some_and(|max| len > max) {
                return Err(SchemaError::new(path, Violation::TooLong));
            }
            if let Some(format) = format {
                if !matches_format(*format, s) {
                    return Err(SchemaError::new(path, Violation::InvalidFormat));
                }
            }
            Ok(())
        }

        (Kind::Object(shape), Value::Object(_)) => validate_object(shape, value, path),

        (Kind::List(element), Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                validate_value(element, item, &format!("{}[{}]", path, i))?;
            }
            Ok(())
        }

        _ => Err(SchemaError::new(path, Violation::InvalidType)),
    }
}
