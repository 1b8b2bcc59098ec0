//! Per-run settings: global flags plus resolved credentials.
//!
//! Built once in `main` and handed to every command handler by reference.

use std::time::Duration;

use mistly_api::{MistClient, ReadOnly, ReadWrite, TransportConfig};
use mistly_config::{CredentialKey, CredentialResolver, Credentials, locate_config};
use tracing::debug;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Debug)]
pub struct Settings {
    pub base_url: String,
    pub transport: TransportConfig,
    pub credentials: Credentials,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
}

impl Settings {
    pub fn load(global: &GlobalOpts) -> Result<Self, CliError> {
        let mut resolver = CredentialResolver::new();
        if let Some(path) = locate_config(global.config.as_deref())? {
            debug!(path = %path.display(), "using config file");
            resolver = resolver.config_file(path);
        }
        let credentials = resolver.resolve()?;

        Ok(Self {
            base_url: global.base_url.clone(),
            transport: TransportConfig::default()
                .with_timeout(Duration::from_secs(global.timeout)),
            credentials,
            output: global.output,
            color: output::should_color(global.color),
            quiet: global.quiet,
            yes: global.yes,
        })
    }

    pub fn read_only_client(&self) -> Result<MistClient<ReadOnly>, CliError> {
        let token = self.credentials.require_token()?;
        Ok(MistClient::read_only(&self.base_url, token, &self.transport)?)
    }

    /// Client for commands that create or delete resources.
    pub fn read_write_client(&self) -> Result<MistClient<ReadWrite>, CliError> {
        let token = self.credentials.require_token()?;
        Ok(MistClient::read_write(&self.base_url, token, &self.transport)?)
    }

    /// The positional argument if given, else the configured org id.
    pub fn org_id<'a>(&'a self, arg: Option<&'a str>) -> Result<&'a str, CliError> {
        self.id_or_configured(arg, CredentialKey::OrgId)
    }

    pub fn site_id<'a>(&'a self, arg: Option<&'a str>) -> Result<&'a str, CliError> {
        self.id_or_configured(arg, CredentialKey::SiteId)
    }

    fn id_or_configured<'a>(
        &'a self,
        arg: Option<&'a str>,
        key: CredentialKey,
    ) -> Result<&'a str, CliError> {
        match arg.filter(|v| !v.trim().is_empty()) {
            Some(id) => Ok(id),
            None => Ok(self.credentials.require(key)?),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(env: &[(&str, &str)]) -> Settings {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Settings {
            base_url: mistly_api::DEFAULT_BASE_URL.into(),
            transport: TransportConfig::default(),
            credentials: CredentialResolver::new().with_env(env).resolve().unwrap(),
            output: OutputFormat::Table,
            color: false,
            quiet: false,
            yes: false,
        }
    }

    #[test]
    fn argument_beats_configured_id() {
        let s = settings(&[("MIST_ORG_ID", "from-env")]);
        assert_eq!(s.org_id(Some("from-arg")).unwrap(), "from-arg");
        assert_eq!(s.org_id(None).unwrap(), "from-env");
    }

    #[test]
    fn missing_site_id_is_usage_error() {
        let s = settings(&[]);
        let err = s.site_id(None).unwrap_err();
        assert!(matches!(err, CliError::MissingValue { env_var: "MIST_SITE_ID", .. }));
    }

    #[test]
    fn client_needs_token() {
        let s = settings(&[]);
        assert!(matches!(s.read_only_client(), Err(CliError::NoToken)));

        let s = settings(&[("MIST_TOKEN", "abcd1234wxyz")]);
        assert!(s.read_write_client().is_ok());
    }
}
