//! `mistly check`: step-by-step environment diagnosis.
//!
//! Each step prints one line and the run continues past failures so the
//! whole picture is visible at once.

use std::time::Duration;

use mistly_api::{MistClient, probe};
use mistly_core::{CoreError, org};
use url::Url;

use crate::error::CliError;
use crate::output::{self, status_word};
use crate::settings::Settings;

const PROBE_TIMEOUT: Duration = Duration::from_secs(1);
const SELF_TIMEOUT: Duration = Duration::from_secs(2);

struct Tally {
    total: usize,
    failed: usize,
    color: bool,
    quiet: bool,
}

impl Tally {
    fn step(&mut self, label: &str, ok: bool, detail: &str) {
        self.total += 1;
        if !ok {
            self.failed += 1;
        }
        let word = status_word(ok, self.color);
        let line = if detail.is_empty() {
            format!("{label}... {word}")
        } else {
            format!("{label}... {word} ({detail})")
        };
        output::print_output(&line, self.quiet);
    }
}

pub async fn handle(settings: &Settings) -> Result<(), CliError> {
    let mut tally = Tally {
        total: 0,
        failed: 0,
        color: settings.color,
        quiet: settings.quiet,
    };

    let base = Url::parse(&settings.base_url);
    let host = base
        .as_ref()
        .ok()
        .and_then(Url::host_str)
        .unwrap_or_default()
        .to_owned();

    // 1. DNS
    let label = format!("Resolving {host}");
    match probe::resolve_host(&host).await {
        Ok(addrs) => match addrs.first() {
            Some(addr) => tally.step(&label, true, &addr.to_string()),
            None => tally.step(&label, false, "no addresses"),
        },
        Err(e) => tally.step(&label, false, &e.to_string()),
    }

    // 2. Base URL reachable
    let label = format!("Connecting to {}", settings.base_url);
    match &base {
        Ok(url) => match probe::reachable(url, PROBE_TIMEOUT).await {
            Ok(status) => tally.step(&label, true, &format!("HTTP {}", status.as_u16())),
            Err(e) => tally.step(&label, false, &e.to_string()),
        },
        Err(e) => tally.step(&label, false, &e.to_string()),
    }

    // 3. Token configured
    let token = settings.credentials.token();
    tally.step("Token configured", token.is_some(), "");

    // 4. Identity
    let label = "Calling /self";
    match token {
        None => tally.step(label, false, "no token"),
        Some(token) => {
            let transport = settings.transport.clone().with_timeout(SELF_TIMEOUT);
            let result = match MistClient::read_only(&settings.base_url, token, &transport) {
                Ok(client) => org::whoami(&client).await,
                Err(e) => Err(CoreError::from(e)),
            };
            match result {
                Ok(me) => tally.step(
                    label,
                    true,
                    &format!("{} {} <{}>", me.first_name, me.last_name, me.email),
                ),
                Err(e) => tally.step(label, false, &failure_detail(&e)),
            }
        }
    }

    if tally.failed > 0 {
        return Err(CliError::CheckFailed {
            failed: tally.failed,
            total: tally.total,
        });
    }
    Ok(())
}

/// `401 Unauthorized` style detail when the server answered.
fn failure_detail(err: &CoreError) -> String {
    match err.as_api().and_then(|e| Some((e.status()?, e.reason()))) {
        Some((status, Some(reason))) => format!("{status} {reason}"),
        Some((status, None)) => status.to_string(),
        None => err.to_string(),
    }
}
