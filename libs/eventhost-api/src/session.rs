//! Session token transport.
//!
//! A session token travels either in an `Authorization: Bearer` header (API
//! clients) or in an `HttpOnly` cookie (browsers). The bearer header wins when
//! both are present.

use http::header::{AUTHORIZATION, COOKIE, InvalidHeaderValue};
use http::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

fn default_cookie_name() -> String {
    "eventhost.session-token".to_owned()
}

/// Cookie settings for the session token.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionCookieConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Adds the `Secure` attribute. Enable for any deployment served over TLS.
    #[serde(default)]
    pub secure: bool,
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secure: false,
        }
    }
}

impl SessionCookieConfig {
    /// Build the `Set-Cookie` value carrying a freshly issued token.
    ///
    /// # Errors
    /// Returns an error if the token contains bytes not allowed in a header.
    pub fn set_cookie(
        &self,
        token: &str,
        max_age_secs: i64,
    ) -> Result<HeaderValue, InvalidHeaderValue> {
        let secure = if self.secure { "; Secure" } else { "" };
        HeaderValue::from_str(&format!(
            "{}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{secure}",
            self.cookie_name,
            max_age_secs.max(0),
        ))
    }

    /// Build the `Set-Cookie` value that expires the session cookie.
    ///
    /// # Errors
    /// Returns an error if the configured cookie name is not a valid header value.
    pub fn clear_cookie(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        self.set_cookie("", 0)
    }

    /// Extract the session token from the request headers.
    #[must_use]
    pub fn extract_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        extract_bearer_token(headers)
            .or_else(|| extract_cookie(headers, &self.cookie_name))
            .filter(|token| !token.is_empty())
    }
}

/// Extract Bearer token from Authorization header
#[must_use]
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").map(str::trim))
}

/// Find a cookie by name across all `Cookie` headers.
#[must_use]
pub fn extract_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}
