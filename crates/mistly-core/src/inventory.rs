// ── Device inventory reports ──
//
// Org reports join the inventory against the site list so each row carries
// a site name. Site reports read the site's own device list and need no join.

use std::collections::HashMap;

use mistly_api::{Access, Endpoint, MistClient};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::model::{Device, Site, decode};
use crate::report::ReportRow;

// ── Rows ────────────────────────────────────────────────────────────

/// One org inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgDeviceRow {
    pub device_name: String,
    pub device_model: String,
    pub device_type: String,
    pub device_serial: String,
    pub site_name: String,
}

impl ReportRow for OrgDeviceRow {
    const COLUMNS: &'static [&'static str] = &[
        "device_name",
        "device_model",
        "device_type",
        "device_serial",
        "site_name",
    ];

    fn cells(&self) -> Vec<&str> {
        vec![
            self.device_name.as_str(),
            self.device_model.as_str(),
            self.device_type.as_str(),
            self.device_serial.as_str(),
            self.site_name.as_str(),
        ]
    }
}

/// One device at a single site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteDeviceRow {
    pub device_name: String,
    pub device_model: String,
    pub device_type: String,
    pub device_serial: String,
}

impl ReportRow for SiteDeviceRow {
    const COLUMNS: &'static [&'static str] =
        &["device_name", "device_model", "device_type", "device_serial"];

    fn cells(&self) -> Vec<&str> {
        vec![
            self.device_name.as_str(),
            self.device_model.as_str(),
            self.device_type.as_str(),
            self.device_serial.as_str(),
        ]
    }
}

impl From<Device> for SiteDeviceRow {
    fn from(d: Device) -> Self {
        Self {
            device_name: d.name,
            device_model: d.model,
            device_type: d.device_type,
            device_serial: d.serial,
        }
    }
}

// ── Options ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceFilter {
    #[default]
    AccessPoints,
    All,
}

impl DeviceFilter {
    fn keeps(self, device: &Device) -> bool {
        match self {
            Self::AccessPoints => device.is_ap(),
            Self::All => true,
        }
    }
}

/// What to do when a device names a site that is not in the site list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownSitePolicy {
    /// Log a warning and leave `site_name` empty.
    #[default]
    Blank,
    /// Abort the report with [`CoreError::UnknownSite`].
    Fail,
}

// ── Row building ────────────────────────────────────────────────────

/// Join inventory devices to site names.
///
/// Input order is preserved. Devices without a `site_id` get an empty
/// site name under either policy.
pub fn org_device_rows(
    sites: &[Site],
    devices: Vec<Device>,
    filter: DeviceFilter,
    policy: UnknownSitePolicy,
) -> Result<Vec<OrgDeviceRow>, CoreError> {
    let names: HashMap<&str, &str> = sites
        .iter()
        .map(|s| (s.id.as_str(), s.name.as_str()))
        .collect();

    devices
        .into_iter()
        .filter(|d| filter.keeps(d))
        .map(|d| {
            let site_name = match d.site_id.as_deref() {
                None => String::new(),
                Some(id) => match names.get(id) {
                    Some(name) => (*name).to_owned(),
                    None if policy == UnknownSitePolicy::Fail => {
                        return Err(CoreError::UnknownSite {
                            serial: d.serial,
                            site_id: id.to_owned(),
                        });
                    }
                    None => {
                        warn!(serial = %d.serial, site_id = id, "device references unknown site");
                        String::new()
                    }
                },
            };
            Ok(OrgDeviceRow {
                device_name: d.name,
                device_model: d.model,
                device_type: d.device_type,
                device_serial: d.serial,
                site_name,
            })
        })
        .collect()
}

/// Keep only access points from a site's device list.
pub fn site_ap_rows(devices: Vec<Device>) -> Vec<SiteDeviceRow> {
    devices
        .into_iter()
        .filter(Device::is_ap)
        .map(SiteDeviceRow::from)
        .collect()
}

// ── Fetching ────────────────────────────────────────────────────────

pub async fn org_sites<A: Access>(
    client: &MistClient<A>,
    org_id: &str,
) -> Result<Vec<Site>, CoreError> {
    let url = client.url(Endpoint::OrgSites(org_id))?;
    decode("site list", client.read(url).await?)
}

pub async fn org_inventory<A: Access>(
    client: &MistClient<A>,
    org_id: &str,
) -> Result<Vec<Device>, CoreError> {
    let url = client.url(Endpoint::OrgInventory(org_id))?;
    decode("inventory", client.read(url).await?)
}

pub async fn site_devices<A: Access>(
    client: &MistClient<A>,
    site_id: &str,
) -> Result<Vec<Device>, CoreError> {
    let url = client.url(Endpoint::SiteDevices(site_id))?;
    decode("site device list", client.read(url).await?)
}

/// Fetch sites then inventory for an org and build report rows.
pub async fn org_device_report<A: Access>(
    client: &MistClient<A>,
    org_id: &str,
    filter: DeviceFilter,
    policy: UnknownSitePolicy,
) -> Result<Vec<OrgDeviceRow>, CoreError> {
    let sites = org_sites(client, org_id).await?;
    let devices = org_inventory(client, org_id).await?;
    info!(
        org_id,
        sites = sites.len(),
        devices = devices.len(),
        ?filter,
        "building org device report"
    );
    org_device_rows(&sites, devices, filter, policy)
}

pub async fn site_ap_report<A: Access>(
    client: &MistClient<A>,
    site_id: &str,
) -> Result<Vec<SiteDeviceRow>, CoreError> {
    let devices = site_devices(client, site_id).await?;
    info!(site_id, devices = devices.len(), "building site AP report");
    Ok(site_ap_rows(devices))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn site(id: &str, name: &str) -> Site {
        Site {
            id: id.into(),
            name: name.into(),
        }
    }

    fn device(serial: &str, kind: &str, site_id: Option<&str>) -> Device {
        Device {
            name: format!("dev-{serial}"),
            model: "M1".into(),
            device_type: kind.into(),
            serial: serial.into(),
            site_id: site_id.map(str::to_owned),
        }
    }

    #[test]
    fn org_rows_keep_aps_in_order_with_site_names() {
        let sites = [site("s1", "HQ"), site("s2", "Branch")];
        let devices = vec![
            device("A1", "ap", Some("s2")),
            device("W1", "switch", Some("s1")),
            device("A2", "ap", Some("s1")),
            device("G1", "gateway", None),
            device("A3", "ap", None),
        ];

        let rows = org_device_rows(
            &sites,
            devices,
            DeviceFilter::AccessPoints,
            UnknownSitePolicy::Blank,
        )
        .unwrap();

        let got: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.device_serial.as_str(), r.site_name.as_str()))
            .collect();
        assert_eq!(got, vec![("A1", "Branch"), ("A2", "HQ"), ("A3", "")]);
    }

    #[test]
    fn org_rows_all_types() {
        let devices = vec![device("A1", "ap", None), device("W1", "switch", None)];
        let rows =
            org_device_rows(&[], devices, DeviceFilter::All, UnknownSitePolicy::Blank).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].device_type, "switch");
    }

    #[test]
    fn unknown_site_blank_or_fail() {
        let devices = || vec![device("A1", "ap", Some("gone"))];

        let rows = org_device_rows(
            &[],
            devices(),
            DeviceFilter::AccessPoints,
            UnknownSitePolicy::Blank,
        )
        .unwrap();
        assert_eq!(rows[0].site_name, "");

        let err = org_device_rows(
            &[],
            devices(),
            DeviceFilter::AccessPoints,
            UnknownSitePolicy::Fail,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnknownSite { ref serial, ref site_id } if serial == "A1" && site_id == "gone"
        ));
    }

    #[test]
    fn unknown_site_on_filtered_device_is_ignored() {
        let devices = vec![device("W1", "switch", Some("gone"))];
        let rows = org_device_rows(
            &[],
            devices,
            DeviceFilter::AccessPoints,
            UnknownSitePolicy::Fail,
        )
        .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn site_rows_drop_non_aps() {
        let rows = site_ap_rows(vec![
            device("A1", "ap", Some("s1")),
            device("W1", "switch", Some("s1")),
        ]);
        assert_eq!(
            rows,
            vec![SiteDeviceRow {
                device_name: "dev-A1".into(),
                device_model: "M1".into(),
                device_type: "ap".into(),
                device_serial: "A1".into(),
            }]
        );
    }
}
