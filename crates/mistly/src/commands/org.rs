//! Org command handlers.

use tabled::Tabled;

use mistly_core::{Device, OrgOverview, OrgStats, Site, Wlan, org};

use crate::cli::{OrgArgs, OrgCommand};
use crate::error::CliError;
use crate::output::{self, heading, render_pairs, render_table};
use crate::settings::Settings;

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Site")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
}

#[derive(Tabled)]
struct WlanRow {
    #[tabled(rename = "SSID")]
    ssid: String,
}

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Type")]
    device_type: String,
}

impl From<&Site> for SiteRow {
    fn from(s: &Site) -> Self {
        Self {
            name: s.name.clone(),
            id: s.id.clone(),
        }
    }
}

impl From<&Wlan> for WlanRow {
    fn from(w: &Wlan) -> Self {
        Self {
            ssid: w.ssid.clone(),
        }
    }
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            name: d.name.clone(),
            model: d.model.clone(),
            device_type: d.device_type.clone(),
        }
    }
}

fn stats_detail(s: &OrgStats) -> String {
    render_pairs(&[
        ("Org", s.name.clone()),
        ("Claimed devices", s.num_inventory.to_string()),
        ("Devices in use", s.num_devices.to_string()),
        ("Connected", s.num_devices_connected.to_string()),
        ("Disconnected", s.num_devices_disconnected.to_string()),
        ("Sites", s.num_sites.to_string()),
    ])
}

fn overview_detail(o: &OrgOverview, color: bool) -> String {
    let sites: Vec<SiteRow> = o.sites.iter().map(SiteRow::from).collect();
    let wlans: Vec<WlanRow> = o.wlans.iter().map(WlanRow::from).collect();
    let devices: Vec<DeviceRow> = o.devices.iter().map(DeviceRow::from).collect();
    [
        heading(&format!("Sites ({})", sites.len()), color),
        render_table(&sites),
        heading(&format!("WLANs ({})", wlans.len()), color),
        render_table(&wlans),
        heading(&format!("Inventory ({})", devices.len()), color),
        render_table(&devices),
    ]
    .join("\n")
}

pub async fn handle(args: OrgArgs, settings: &Settings) -> Result<(), CliError> {
    let client = settings.read_only_client()?;

    match args.command {
        OrgCommand::Summary { org_id } => {
            let org_id = settings.org_id(org_id.as_deref())?;
            let stats = org::org_stats(&client, org_id).await?;
            let out = output::render_single(settings.output, &stats, stats_detail, |s| {
                s.name.clone()
            })?;
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        OrgCommand::Overview { org_id } => {
            let org_id = settings.org_id(org_id.as_deref())?;
            let overview = org::org_overview(&client, org_id).await?;
            let out = output::render_single(
                settings.output,
                &overview,
                |o| overview_detail(o, settings.color),
                |o| {
                    o.sites
                        .iter()
                        .map(|s| s.name.as_str())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )?;
            output::print_output(&out, settings.quiet);
            Ok(())
        }
    }
}
