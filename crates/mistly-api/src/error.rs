use thiserror::Error;
use url::Url;

/// Top-level error type for the `mistly-api` crate.
///
/// `mistly-core` maps these into domain errors; the CLI turns them into
/// diagnostics. Every HTTP-level failure keeps the status code and the
/// request URL.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// The token cannot be encoded as an HTTP header value.
    #[error("Invalid API token: {message}")]
    InvalidToken { message: String },

    /// The base URL cannot carry a path (e.g. `mailto:`).
    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// reqwest refused the client configuration.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, TLS, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Host name did not resolve.
    #[error("DNS lookup for {host} failed: {source}")]
    Dns {
        host: String,
        #[source]
        source: std::io::Error,
    },

    // ── API ─────────────────────────────────────────────────────────
    /// Any response other than HTTP 200.
    #[error("Query to Mist API failed: HTTP {status} for {url}")]
    Api { status: u16, url: Url, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// A 200 response whose body is not JSON, with the raw body for debugging.
    #[error("Deserialization error for {url}: {message}")]
    Deserialization {
        url: Url,
        message: String,
        body: String,
    },
}

impl Error {
    /// HTTP status of a rejected request, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Canonical reason phrase for [`status`](Self::status), e.g. `"Unauthorized"`.
    pub fn reason(&self) -> Option<&'static str> {
        reqwest::StatusCode::from_u16(self.status()?)
            .ok()?
            .canonical_reason()
    }

    /// The request URL, when known.
    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::Api { url, .. } | Self::Deserialization { url, .. } => Some(url),
            Self::Transport(e) => e.url(),
            _ => None,
        }
    }

    /// Returns `true` if the token was rejected (401 or 403).
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if no HTTP response was received at all.
    pub fn is_connection(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            Self::Dns { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rejected(status: u16) -> Error {
        Error::Api {
            status,
            url: Url::parse("https://api.mist.com/api/v1/self").unwrap(),
            body: String::new(),
        }
    }

    #[test]
    fn status_and_reason_for_rejected_call() {
        let err = rejected(401);
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.reason(), Some("Unauthorized"));
        assert!(err.is_auth_rejected());
    }

    #[test]
    fn no_reason_without_status() {
        let err = Error::InvalidToken {
            message: "bad".into(),
        };
        assert_eq!(err.status(), None);
        assert_eq!(err.reason(), None);
    }
}
