//! Typed client for the ghost sharing HTTP API.
//!
//! [`ApiClient`] wraps four HTTP verbs (JSON GET, DELETE and POST, plus a
//! multipart POST and a raw GET for bundles) and exposes one method per
//! remote operation on top of them. Each method takes and returns the
//! payload structs from [`crate::schema`].
//!
//! ## Call contract
//!
//! 1. The request body, if any, is validated; a [`SchemaError`] aborts the
//!    call before anything is sent.
//! 2. The CSRF token source is asked for a token, which is attached as a
//!    header if present.
//! 3. One request is sent.
//! 4. The JSON reply is validated against the response shape and only
//!    then converted to its struct.
//!
//! Transport errors pass through as [`ApiError::Transport`]. A reply with
//! `success: false` is returned as data.
//!
//! [`SchemaError`]: crate::schema::SchemaError

mod client;
mod csrf;
mod endpoints;
mod error;

pub use client::{ApiClient, UploadFile};
pub use csrf::{CookieJarCsrf, CsrfTokenSource, NoCsrfToken, StaticCsrfToken, find_cookie};
pub use error::{ApiError, Result};
