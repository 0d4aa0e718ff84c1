//! Wire shapes and their structural validation.
//!
//! Payloads are checked as JSON before they are trusted: requests before
//! they are sent, responses before they are deserialised into typed
//! structs. The checks are driven by static [`Shape`] tables rather than
//! per-type code, so every payload goes through the same
//! [`validate`](validator::validate) routine.
//!
//! - [`descriptor`]: `Shape`, `Field`, `Kind` and `Format`
//! - [`validator`]: the generic validator
//! - [`shapes`]: the payload structs and their shapes
//! - [`error`]: `SchemaError` and `Violation`

pub mod descriptor;
pub mod error;
pub mod shapes;
pub mod validator;

pub use descriptor::{Field, Format, Kind, Shape};
pub use error::{SchemaError, Violation};
pub use shapes::*;
pub use validator::{matches_format, validate};
