//! CLI error types with miette diagnostics.
//!
//! Maps API, core, and config errors into user-facing errors with
//! actionable help text and a process exit code.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use mistly_config::{ConfigError, CredentialKey};
use mistly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Mist API at {url}")]
    #[diagnostic(
        code(mistly::connection_failed),
        help(
            "Check network access and the base URL (--base-url / MIST_BASE_URL).\n\
             Try: mistly check"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: mistly_api::Error,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("MIST_TOKEN is not configured")]
    #[diagnostic(
        code(mistly::no_token),
        help(
            "Set MIST_TOKEN, or add \"token\" to the config file.\n\
             Tokens are created under My Account > API Token in the Mist portal."
        )
    )]
    NoToken,

    #[error("The API token was rejected (HTTP {status}) for {url}")]
    #[diagnostic(
        code(mistly::auth_failed),
        help("Verify MIST_TOKEN and that it has access to this org or site.")
    )]
    AuthFailed { status: u16, url: String },

    #[error("Invalid API token: {message}")]
    #[diagnostic(
        code(mistly::invalid_token),
        help("The token must be printable ASCII with no line breaks.")
    )]
    InvalidToken { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Not found: {url}")]
    #[diagnostic(
        code(mistly::not_found),
        help("Check the org, site, or token id. Ids are UUIDs, not names.")
    )]
    NotFound { url: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Query to Mist API failed: HTTP {status} for {url}")]
    #[diagnostic(code(mistly::api_error))]
    Api {
        status: u16,
        url: String,
        /// Response body, shown as help when the server sent one.
        #[help]
        body: Option<String>,
    },

    #[error("Unexpected response: {message}")]
    #[diagnostic(code(mistly::unexpected_response), help("Run with -vv to log each request."))]
    UnexpectedResponse { message: String },

    #[error("Device {serial} references unknown site {site_id}")]
    #[diagnostic(
        code(mistly::unknown_site),
        help("Run without --strict to write such devices with an empty site name.")
    )]
    UnknownSite { serial: String, site_id: String },

    #[error("Cannot tell which of {count} tokens is in use (looked for {masked})")]
    #[diagnostic(
        code(mistly::unidentified_token),
        help("Nothing was deleted. Remove tokens one by one with: mistly tokens delete <TOKEN_ID>")
    )]
    UnidentifiedToken { masked: String, count: usize },

    #[error("{failed} of {total} checks failed")]
    #[diagnostic(code(mistly::check_failed))]
    CheckFailed { failed: usize, total: usize },

    // ── Configuration ────────────────────────────────────────────────
    #[error("{key} is not configured (set {env_var})")]
    #[diagnostic(
        code(mistly::missing_value),
        help("Pass it as an argument, set {env_var}, or add \"{field}\" to the config file.")
    )]
    MissingValue {
        key: CredentialKey,
        env_var: &'static str,
        field: &'static str,
    },

    #[error("Config file not found: {}", .path.display())]
    #[diagnostic(code(mistly::no_config), help("Check --config / MIST_CONFIG."))]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid config file")]
    #[diagnostic(
        code(mistly::config),
        help("The config file must be a JSON object with string values.")
    )]
    Config(#[source] Box<figment::Error>),

    #[error("Invalid base URL: {url}")]
    #[diagnostic(
        code(mistly::base_url),
        help("Use an http(s) URL such as https://api.mist.com")
    )]
    InvalidBaseUrl { url: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(mistly::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error("Failed to write {}", .path.display())]
    #[diagnostic(code(mistly::io))]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to render output: {message}")]
    #[diagnostic(code(mistly::render))]
    Render { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NoToken | Self::AuthFailed { .. } | Self::InvalidToken { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::MissingValue { .. }
            | Self::ConfigNotFound { .. }
            | Self::Config(_)
            | Self::InvalidBaseUrl { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── API / core / config → CliError ───────────────────────────────────

impl From<mistly_api::Error> for CliError {
    fn from(err: mistly_api::Error) -> Self {
        use mistly_api::Error as E;

        if err.is_connection() {
            let url = err.url().map_or_else(|| "(unknown)".into(), ToString::to_string);
            return Self::ConnectionFailed { url, source: err };
        }
        if err.is_auth_rejected() || err.is_not_found() {
            let status = err.status().unwrap_or_default();
            let url = err.url().map(ToString::to_string).unwrap_or_default();
            return if status == 404 {
                Self::NotFound { url }
            } else {
                Self::AuthFailed { status, url }
            };
        }

        match err {
            E::Api { status, url, body } => Self::Api {
                status,
                url: url.to_string(),
                body: Some(body).filter(|b| !b.trim().is_empty()),
            },
            E::InvalidToken { message } => Self::InvalidToken { message },
            E::InvalidBaseUrl { url } => Self::InvalidBaseUrl { url },
            E::InvalidUrl(e) => Self::InvalidBaseUrl { url: e.to_string() },
            other => Self::UnexpectedResponse {
                message: other.to_string(),
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(e) => e.into(),
            CoreError::Decode { .. } => Self::UnexpectedResponse {
                message: err.to_string(),
            },
            CoreError::UnknownSite { serial, site_id } => Self::UnknownSite { serial, site_id },
            CoreError::UnidentifiedToken { masked, count } => {
                Self::UnidentifiedToken { masked, count }
            }
            CoreError::ReportDir { path, source } => Self::Write {
                path,
                source: Box::new(source),
            },
            CoreError::Report { path, source } => Self::Write {
                path,
                source: Box::new(source),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing {
                key: CredentialKey::Token,
            } => Self::NoToken,
            ConfigError::Missing { key } => Self::MissingValue {
                key,
                env_var: key.env_var(),
                field: key.field(),
            },
            ConfigError::NotFound { path } => Self::ConfigNotFound { path },
            ConfigError::Figment(e) => Self::Config(e),
        }
    }
}
