use std::sync::Arc;

use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};

/// Supplies the CSRF token attached to every request.
///
/// The token is looked up again for each call; sources must not cache it.
pub trait CsrfTokenSource: Send + Sync {
    fn csrf_token(&self) -> Option<String>;
}

/// Never sends a CSRF header
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCsrfToken;

impl CsrfTokenSource for NoCsrfToken {
    fn csrf_token(&self) -> Option<String> {
        None
    }
}

/// Always sends the same token
#[derive(Debug, Clone)]
pub struct StaticCsrfToken(pub String);

impl CsrfTokenSource for StaticCsrfToken {
    fn csrf_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Reads the token from a cookie in a shared jar
///
/// This is the browser behaviour: the server sets the cookie on an earlier
/// response and the client echoes it back in a header.
pub struct CookieJarCsrf {
    jar: Arc<Jar>,
    url: Url,
    cookie_name: String,
}

impl CookieJarCsrf {
    pub fn new(jar: Arc<Jar>, url: Url, cookie_name: impl Into<String>) -> Self {
        Self {
            jar,
            url,
            cookie_name: cookie_name.into(),
        }
    }
}

impl CsrfTokenSource for CookieJarCsrf {
    fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.url)?;
        let cookies = header.to_str().ok()?;
        find_cookie(cookies, &self.cookie_name)
    }
}

/// Find `name` in a `Cookie` header value and percent-decode it.
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|cookie| {
        let value = cookie.trim().strip_prefix(name)?.strip_prefix('=')?;
        Some(
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string()),
        )
    })
}
