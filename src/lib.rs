//! # haunted-client
//!
//! Client for the haunted sessions ghost sharing service.
//!
//! This library talks to the service's HTTP API and unpacks the ghost
//! bundles it serves. Every JSON payload is checked against a declared shape
//! before it is sent or trusted, so a server that drifts from the expected
//! wire contract produces a precise [`SchemaError`] instead of a confusing
//! deserialisation failure further down.
//!
//! ## Features
//!
//! - One async method per API operation (sessions, tags, accounts, ghosts)
//! - Table-driven structural validation with dotted field paths in errors
//! - CSRF token attachment from a cookie jar or a caller-supplied source
//! - Zero-copy listing and slicing of tar ghost bundles
//!
//! ## Example
//!
//! ```no_run
//! use haunted_client::{ApiClient, ClientConfig, LoginRequest, TarExtractor};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ApiClient::new(ClientConfig::new("https://ghosts.example.com")?)?;
//!
//!     let reply = client
//!         .login(&LoginRequest {
//!             username: "player".into(),
//!             password: "secret".into(),
//!         })
//!         .await?;
//!     if !reply.success {
//!         anyhow::bail!("login failed: {}", reply.message);
//!     }
//!
//!     if let Some(bundle) = client.download_ghost(7).await? {
//!         for entry in TarExtractor::new(&bundle).list_files() {
//!             println!("{} ({} bytes)", entry.name, entry.size);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod schema;
pub mod tar;

pub use api::{ApiClient, ApiError, UploadFile};
pub use cli::Cli;
pub use config::{ClientConfig, ConfigError};
pub use schema::{LoginRequest, SchemaError, Shape, Validated, Violation};
pub use tar::{TarEntry, TarExtractor};
