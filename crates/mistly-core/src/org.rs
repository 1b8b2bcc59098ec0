// Organisation-level reads: stats, overview, and the token owner.

use mistly_api::{Access, Endpoint, MistClient};
use serde::Serialize;
use tracing::info;

use crate::error::CoreError;
use crate::inventory::{org_inventory, org_sites};
use crate::model::{Device, OrgStats, SelfInfo, Site, Wlan, decode};

/// Everything `org overview` prints, fetched in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct OrgOverview {
    pub sites: Vec<Site>,
    pub wlans: Vec<Wlan>,
    pub devices: Vec<Device>,
}

pub async fn org_stats<A: Access>(
    client: &MistClient<A>,
    org_id: &str,
) -> Result<OrgStats, CoreError> {
    let url = client.url(Endpoint::OrgStats(org_id))?;
    decode("org stats", client.read(url).await?)
}

pub async fn org_wlans<A: Access>(
    client: &MistClient<A>,
    org_id: &str,
) -> Result<Vec<Wlan>, CoreError> {
    let url = client.url(Endpoint::OrgWlans(org_id))?;
    decode("wlan list", client.read(url).await?)
}

/// Sites, then WLANs, then inventory. Stops at the first failure.
pub async fn org_overview<A: Access>(
    client: &MistClient<A>,
    org_id: &str,
) -> Result<OrgOverview, CoreError> {
    let sites = org_sites(client, org_id).await?;
    let wlans = org_wlans(client, org_id).await?;
    let devices = org_inventory(client, org_id).await?;
    info!(
        org_id,
        sites = sites.len(),
        wlans = wlans.len(),
        devices = devices.len(),
        "org overview fetched"
    );
    Ok(OrgOverview {
        sites,
        wlans,
        devices,
    })
}

/// The account that owns the current token.
pub async fn whoami<A: Access>(client: &MistClient<A>) -> Result<SelfInfo, CoreError> {
    let url = client.url(Endpoint::SelfInfo)?;
    decode("self", client.read(url).await?)
}
