use bytes::Bytes;
use reqwest::cookie::Jar;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use super::csrf::{CookieJarCsrf, CsrfTokenSource};
use super::error::{ApiError, Result};
use crate::config::ClientConfig;
use crate::schema::{Validated, validate};

/// A file to send in a multipart upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original filename; used as both the form field name and the filename
    pub name: String,
    pub data: Bytes,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Read a local file, keeping only its file name
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Ok(Self::new(name, data))
    }
}

/// HTTP client for the ghost sharing API
///
/// Every call is one round trip. Request bodies are validated before
/// anything is sent and JSON responses are validated before they are
/// returned. There are no retries, timeouts or caches.
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    csrf: Arc<dyn CsrfTokenSource>,
}

impl ApiClient {
    /// Create a client with its own cookie jar
    ///
    /// Cookies set by the server are sent back on later calls, and the
    /// CSRF token is read from the jar before each request.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let csrf = Arc::new(CookieJarCsrf::new(
            jar.clone(),
            config.server_url.clone(),
            config.csrf_cookie.clone(),
        ));

        let client = Client::builder()
            .cookie_provider(jar)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            config,
            csrf,
        })
    }

    /// Create a client whose CSRF token comes from `csrf`
    pub fn with_token_source(config: ClientConfig, csrf: Arc<dyn CsrfTokenSource>) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            config,
            csrf,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET a JSON document
    pub async fn get<Res: Validated>(&self, path: &str) -> Result<Res> {
        let response = self.request(Method::GET, path).send().await?;
        decode(response).await
    }

    /// DELETE and read the JSON reply
    pub async fn delete<Res: Validated>(&self, path: &str) -> Result<Res> {
        let response = self.request(Method::DELETE, path).send().await?;
        decode(response).await
    }

    /// POST a JSON body and read the JSON reply
    pub async fn post<Req: Validated, Res: Validated>(&self, path: &str, body: &Req) -> Result<Res> {
        body.validate()?;

        let response = self.request(Method::POST, path).json(body).send().await?;
        decode(response).await
    }

    /// POST files as one multipart body, each part keyed by its filename
    pub async fn post_files<Res: Validated>(&self, path: &str, files: &[UploadFile]) -> Result<Res> {
        let form = files.iter().fold(Form::new(), |form, file| {
            let part = Part::bytes(file.data.to_vec()).file_name(file.name.clone());
            form.part(file.name.clone(), part)
        });

        let response = self.request(Method::POST, path).multipart(form).send().await?;
        decode(response).await
    }

    /// GET a raw body
    ///
    /// Returns `None` when the server answers with an error status or an
    /// empty body.
    pub async fn get_file(&self, path: &str) -> Result<Option<Bytes>> {
        let response = self.request(Method::GET, path).send().await?;

        if !response.status().is_success() {
            warn!(path, status = %response.status(), "file not available");
            return Ok(None);
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(None);
        }

        debug!(path, bytes = body.len(), "file downloaded");
        Ok(Some(body))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "sending request");

        let builder = self.client.request(method, self.config.endpoint(path));
        match self.csrf.csrf_token() {
            Some(token) => builder.header(self.config.csrf_header.as_str(), token),
            None => builder,
        }
    }
}

/// Decode a JSON body, validate it against `Res`'s shape, then convert it.
///
/// The status code is not checked: the server reports failures as regular
/// JSON bodies.
async fn decode<Res: Validated>(response: Response) -> Result<Res> {
    let status = response.status();
    let value: Value = response.json().await?;

    if let Err(err) = validate(Res::SHAPE, &value) {
        warn!(%status, error = %err, "response rejected");
        return Err(err.into());
    }

    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        shape: Res::SHAPE.name,
        source,
    })
}

/// Percent-encode a value for use as one path segment.
pub(crate) fn segment(value: impl Display) -> String {
    urlencoding::encode(&value.to_string()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_encoded() {
        assert_eq!(segment("abc"), "abc");
        assert_eq!(segment("a b/c?d"), "a%20b%2Fc%3Fd");
        assert_eq!(segment(42), "42");
    }

    #[test]
    fn upload_file_from_parts() {
        let file = UploadFile::new("run.tar.xz", vec![1u8, 2, 3]);
        assert_eq!(file.name, "run.tar.xz");
        assert_eq!(file.data.as_ref(), &[1, 2, 3]);
    }
}
