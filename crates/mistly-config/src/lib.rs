//! Credential resolution for mistly.
//!
//! A token plus optional org/site/device/client identifiers, read from
//! `MIST_*` environment variables first and then from an optional JSON
//! config file for anything still missing. The result is an immutable
//! [`Credentials`] value built once at startup and passed to whoever needs
//! it; nothing here is global.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Format, Json, Serialized},
};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// File name looked up in the working directory and the platform config dir.
pub const CONFIG_FILE_NAME: &str = "config.json";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not configured (set {} or add \"{key}\" to the config file)", .key.env_var())]
    Missing { key: CredentialKey },

    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Keys ────────────────────────────────────────────────────────────

/// The values a command may need, each with its environment variable and
/// config-file key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CredentialKey {
    Token,
    OrgId,
    SiteId,
    DeviceId,
    ClientId,
}

impl CredentialKey {
    pub const ALL: [Self; 5] = [
        Self::Token,
        Self::OrgId,
        Self::SiteId,
        Self::DeviceId,
        Self::ClientId,
    ];

    pub fn env_var(self) -> &'static str {
        match self {
            Self::Token => "MIST_TOKEN",
            Self::OrgId => "MIST_ORG_ID",
            Self::SiteId => "MIST_SITE_ID",
            Self::DeviceId => "MIST_DEVICE_ID",
            Self::ClientId => "MIST_CLIENT_ID",
        }
    }

    /// Key name inside the JSON config file.
    pub fn field(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::OrgId => "org_id",
            Self::SiteId => "site_id",
            Self::DeviceId => "device_id",
            Self::ClientId => "client_id",
        }
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

// ── Environment sources ─────────────────────────────────────────────

/// Where environment variables come from.
///
/// The binary uses [`ProcessEnv`]; tests and embedders can pass a map.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

// ── Config file path ────────────────────────────────────────────────

/// `config.json` in the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "mistly", "mistly")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Pick the config file to read.
///
/// An explicit path must exist. Otherwise `./config.json` wins over the
/// platform config directory, and having neither is fine.
pub fn locate_config(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(default_config_path().filter(|p| p.is_file()))
}

// ── Resolved values ─────────────────────────────────────────────────

/// Which source a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Environment,
    ConfigFile,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => f.write_str("environment"),
            Self::ConfigFile => f.write_str("config file"),
        }
    }
}

/// Resolved credential set. Absent values stay `None`; callers decide
/// whether that is fatal via [`require_token`](Self::require_token) and
/// [`require`](Self::require).
#[derive(Debug, Default)]
pub struct Credentials {
    token: Option<SecretString>,
    ids: BTreeMap<CredentialKey, String>,
    sources: BTreeMap<CredentialKey, Source>,
    config_file: Option<PathBuf>,
}

impl Credentials {
    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// An identifier value. Always `None` for [`CredentialKey::Token`].
    pub fn get(&self, key: CredentialKey) -> Option<&str> {
        self.ids.get(&key).map(String::as_str)
    }

    pub fn org_id(&self) -> Option<&str> {
        self.get(CredentialKey::OrgId)
    }

    pub fn site_id(&self) -> Option<&str> {
        self.get(CredentialKey::SiteId)
    }

    pub fn device_id(&self) -> Option<&str> {
        self.get(CredentialKey::DeviceId)
    }

    pub fn client_id(&self) -> Option<&str> {
        self.get(CredentialKey::ClientId)
    }

    pub fn source(&self, key: CredentialKey) -> Option<Source> {
        self.sources.get(&key).copied()
    }

    /// The config file that was consulted, if one existed.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    pub fn require_token(&self) -> Result<&SecretString, ConfigError> {
        self.token.as_ref().ok_or(ConfigError::Missing {
            key: CredentialKey::Token,
        })
    }

    pub fn require(&self, key: CredentialKey) -> Result<&str, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing { key })
    }
}

// ── Resolver ────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct RawCredentials {
    token: Option<String>,
    org_id: Option<String>,
    site_id: Option<String>,
    device_id: Option<String>,
    client_id: Option<String>,
}

impl RawCredentials {
    fn take(&mut self, key: CredentialKey) -> Option<String> {
        let slot = match key {
            CredentialKey::Token => &mut self.token,
            CredentialKey::OrgId => &mut self.org_id,
            CredentialKey::SiteId => &mut self.site_id,
            CredentialKey::DeviceId => &mut self.device_id,
            CredentialKey::ClientId => &mut self.client_id,
        };
        slot.take().filter(|v| !v.trim().is_empty())
    }
}

/// Builds [`Credentials`] from an environment source and an optional file.
#[derive(Debug, Default)]
pub struct CredentialResolver<E = ProcessEnv> {
    env: E,
    config_file: Option<PathBuf>,
}

impl CredentialResolver<ProcessEnv> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: EnvSource> CredentialResolver<E> {
    /// Swap the environment source.
    pub fn with_env<F: EnvSource>(self, env: F) -> CredentialResolver<F> {
        CredentialResolver {
            env,
            config_file: self.config_file,
        }
    }

    /// Read fallback values from this JSON file. A missing file is skipped.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Environment first, then the config file for keys still missing.
    ///
    /// Empty or whitespace-only values count as absent in both sources.
    pub fn resolve(&self) -> Result<Credentials, ConfigError> {
        let env_values: BTreeMap<&'static str, String> = CredentialKey::ALL
            .iter()
            .filter_map(|key| {
                self.env
                    .var(key.env_var())
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (key.field(), v))
            })
            .collect();

        let mut figment = Figment::new();
        let config_file = self.config_file.clone().filter(|p| p.is_file());
        if let Some(ref path) = config_file {
            debug!(path = %path.display(), "reading config file");
            figment = figment.merge(Json::file(path));
        }
        let mut raw: RawCredentials = figment
            .merge(Serialized::defaults(&env_values))
            .extract()?;

        let mut creds = Credentials {
            config_file,
            ..Credentials::default()
        };

        for key in CredentialKey::ALL {
            let Some(value) = raw.take(key) else {
                continue;
            };
            let source = if env_values.contains_key(key.field()) {
                Source::Environment
            } else {
                Source::ConfigFile
            };
            debug!(%key, %source, "resolved credential");
            creds.sources.insert(key, source);

            if key == CredentialKey::Token {
                creds.token = Some(SecretString::from(value));
            } else {
                creds.ids.insert(key, value);
            }
        }

        Ok(creds)
    }
}
