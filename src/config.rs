//! Client configuration.

use reqwest::Url;
use thiserror::Error;

/// Environment variable holding the server base URL.
pub const SERVER_URL_ENV: &str = "HAUNTED_SERVER_URL";

const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid server url {url:?}: {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("server url {0:?} must use http or https")]
    UnsupportedScheme(String),

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}

/// Configuration for [`ApiClient`](crate::api::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL that API paths such as `/api/v0/tags` are appended to.
    pub server_url: Url,
    /// Cookie the CSRF token is read from (default: `csrftoken`).
    pub csrf_cookie: String,
    /// Header the CSRF token is sent in (default: `X-CSRFToken`).
    pub csrf_header: String,
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration for the server at `server_url`, other settings default.
    pub fn new(server_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            server_url: parse_server_url(server_url)?,
            ..Self::default()
        })
    }

    /// Read the server URL from `HAUNTED_SERVER_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(SERVER_URL_ENV).ok())
    }

    fn from_env_value(url: Option<String>) -> Result<Self, ConfigError> {
        let url = url.ok_or(ConfigError::MissingEnv(SERVER_URL_ENV))?;
        Self::new(&url)
    }

    /// Absolute URL for an API path.
    ///
    /// The path is appended to the base URL as-is, so a base URL with a
    /// path prefix (`https://host/haunted`) keeps it.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.server_url.as_str().trim_end_matches('/'), path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: Url::parse(DEFAULT_SERVER_URL).expect("default server url is valid"),
            csrf_cookie: "csrftoken".into(),
            csrf_header: "X-CSRFToken".into(),
            user_agent: concat!("haunted/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

fn parse_server_url(url: &str) -> Result<Url, ConfigError> {
    let parsed = Url::parse(url).map_err(|source| ConfigError::InvalidServerUrl {
        url: url.to_string(),
        source,
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(ConfigError::UnsupportedScheme(url.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.server_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.csrf_cookie, "csrftoken");
        assert_eq!(config.csrf_header, "X-CSRFToken");
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = ClientConfig::new("https://ghosts.example.com/").unwrap();
        assert_eq!(
            config.endpoint("/api/v0/tags"),
            "https://ghosts.example.com/api/v0/tags"
        );

        let config = ClientConfig::new("https://example.com/haunted").unwrap();
        assert_eq!(
            config.endpoint("/api/v0/tags"),
            "https://example.com/haunted/api/v0/tags"
        );
    }

    #[test]
    fn env_value_is_required() {
        assert!(matches!(
            ClientConfig::from_env_value(None),
            Err(ConfigError::MissingEnv(SERVER_URL_ENV))
        ));

        let config = ClientConfig::from_env_value(Some("https://ghosts.example.com".into())).unwrap();
        assert_eq!(config.server_url.as_str(), "https://ghosts.example.com/");
        assert_eq!(config.csrf_header, "X-CSRFToken");

        assert!(matches!(
            ClientConfig::from_env_value(Some("ftp://ghosts.example.com".into())),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn from_env_reads_server_url_variable() {
        match std::env::var(SERVER_URL_ENV) {
            Ok(url) => assert_eq!(
                ClientConfig::from_env().map(|c| c.server_url).ok(),
                ClientConfig::new(&url).map(|c| c.server_url).ok()
            ),
            Err(_) => assert!(matches!(
                ClientConfig::from_env(),
                Err(ConfigError::MissingEnv(_))
            )),
        }
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ConfigError::InvalidServerUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }
}
