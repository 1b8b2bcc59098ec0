// ── Core error types ──
//
// Errors from report building and workflows. Transport failures pass
// through untouched in `Api` so the status code and URL survive all the way
// to the CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API errors ───────────────────────────────────────────────────
    #[error(transparent)]
    Api(#[from] mistly_api::Error),

    // ── Data errors ──────────────────────────────────────────────────
    /// A payload lacked a field we need, or had the wrong shape.
    #[error("Unexpected {what} payload: {message}")]
    Decode { what: &'static str, message: String },

    #[error("Device {serial} references unknown site {site_id}")]
    UnknownSite { serial: String, site_id: String },

    // ── Token errors ─────────────────────────────────────────────────
    #[error("Cannot identify the token in use (key {masked}) among {count} tokens")]
    UnidentifiedToken { masked: String, count: usize },

    // ── Report errors ────────────────────────────────────────────────
    #[error("Failed to create reports directory {}: {source}", .path.display())]
    ReportDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl CoreError {
    /// The underlying API error, if any.
    pub fn as_api(&self) -> Option<&mistly_api::Error> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}
