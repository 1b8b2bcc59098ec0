// Wireless client session reports.

use indexmap::IndexMap;
use mistly_api::{Access, Endpoint, MistClient};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::{ClientSession, SessionSearch, decode};
use crate::report::ReportRow;

pub const APPLE: &str = "Apple";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRow {
    pub client_manufacture: String,
    pub client_family: String,
    pub client_model: String,
    pub client_os: String,
    pub mac: String,
    pub band: String,
}

impl ReportRow for ClientRow {
    const COLUMNS: &'static [&'static str] = &[
        "client_manufacture",
        "client_family",
        "client_model",
        "client_os",
        "mac",
        "band",
    ];

    fn cells(&self) -> Vec<&str> {
        vec![
            self.client_manufacture.as_str(),
            self.client_family.as_str(),
            self.client_model.as_str(),
            self.client_os.as_str(),
            self.mac.as_str(),
            self.band.as_str(),
        ]
    }
}

impl From<ClientSession> for ClientRow {
    fn from(s: ClientSession) -> Self {
        Self {
            client_manufacture: s.client_manufacture,
            client_family: s.client_family,
            client_model: s.client_model,
            client_os: s.client_os,
            mac: s.mac,
            band: s.band,
        }
    }
}

/// Collapse sessions to one per MAC, keeping the first seen.
///
/// MACs compare as exact strings.
pub fn dedup_by_mac(sessions: Vec<ClientSession>) -> Vec<ClientSession> {
    let total = sessions.len();
    let mut by_mac: IndexMap<String, ClientSession> = IndexMap::with_capacity(total);
    for session in sessions {
        by_mac.entry(session.mac.clone()).or_insert(session);
    }
    debug!(total, unique = by_mac.len(), "deduplicated sessions");
    by_mac.into_values().collect()
}

/// Search a site's client sessions by manufacturer.
pub async fn search_sessions<A: Access>(
    client: &MistClient<A>,
    site_id: &str,
    manufacturer: &str,
) -> Result<Vec<ClientSession>, CoreError> {
    let url = client.url_with_query(
        Endpoint::SiteClientSessionSearch(site_id),
        &[("client_manufacture", manufacturer)],
    )?;
    let search: SessionSearch = decode("client session search", client.read(url).await?)?;
    Ok(search.results)
}

/// Apple clients seen at a site, one row per MAC.
pub async fn apple_client_report<A: Access>(
    client: &MistClient<A>,
    site_id: &str,
) -> Result<Vec<ClientRow>, CoreError> {
    let sessions = search_sessions(client, site_id, APPLE).await?;
    info!(site_id, sessions = sessions.len(), "building Apple client report");
    Ok(dedup_by_mac(sessions)
        .into_iter()
        .map(ClientRow::from)
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn session(mac: &str, model: &str) -> ClientSession {
        ClientSession {
            client_manufacture: APPLE.into(),
            client_family: "iPhone".into(),
            client_model: model.into(),
            client_os: "17".into(),
            mac: mac.into(),
            band: "5".into(),
        }
    }

    #[test]
    fn dedup_keeps_first_seen_in_order() {
        let out = dedup_by_mac(vec![
            session("aa", "first"),
            session("bb", "only"),
            session("aa", "second"),
            session("cc", "only"),
            session("bb", "again"),
        ]);

        let got: Vec<(&str, &str)> = out
            .iter()
            .map(|s| (s.mac.as_str(), s.client_model.as_str()))
            .collect();
        assert_eq!(got, vec![("aa", "first"), ("bb", "only"), ("cc", "only")]);
    }

    #[test]
    fn dedup_is_case_sensitive() {
        let out = dedup_by_mac(vec![session("AA", "x"), session("aa", "y")]);
        assert_eq!(out.len(), 2);
    }
}
