//! Report command handlers: fetch, build rows, write one CSV per run.

use chrono::Local;

use mistly_core::report::{self, ReportKind, ReportRow};
use mistly_core::{DeviceFilter, UnknownSitePolicy, clients, inventory};

use crate::cli::{OrgReportArgs, ReportArgs, ReportCommand};
use crate::error::CliError;
use crate::output;
use crate::settings::Settings;

pub async fn handle(args: ReportArgs, settings: &Settings) -> Result<(), CliError> {
    let client = settings.read_only_client()?;
    let dir = args.reports_dir.as_path();

    match args.command {
        ReportCommand::OrgAps(opts) => {
            let (org_id, policy) = org_opts(&opts, settings)?;
            let rows =
                inventory::org_device_report(&client, org_id, DeviceFilter::AccessPoints, policy)
                    .await?;
            write(dir, ReportKind::OrgAps, &rows, settings)
        }

        ReportCommand::OrgInventory(opts) => {
            let (org_id, policy) = org_opts(&opts, settings)?;
            let rows =
                inventory::org_device_report(&client, org_id, DeviceFilter::All, policy).await?;
            write(dir, ReportKind::OrgInventory, &rows, settings)
        }

        ReportCommand::SiteAps { site_id } => {
            let site_id = settings.site_id(Some(site_id.as_str()))?;
            let rows = inventory::site_ap_report(&client, site_id).await?;
            write(dir, ReportKind::SiteAps, &rows, settings)
        }

        ReportCommand::AppleClients { site_id } => {
            let site_id = settings.site_id(site_id.as_deref())?;
            let rows = clients::apple_client_report(&client, site_id).await?;
            write(dir, ReportKind::AppleClients, &rows, settings)
        }
    }
}

fn org_opts<'a>(
    opts: &'a OrgReportArgs,
    settings: &'a Settings,
) -> Result<(&'a str, UnknownSitePolicy), CliError> {
    let org_id = settings.org_id(opts.org_id.as_deref())?;
    let policy = if opts.strict {
        UnknownSitePolicy::Fail
    } else {
        UnknownSitePolicy::Blank
    };
    Ok((org_id, policy))
}

fn write<R: ReportRow>(
    dir: &std::path::Path,
    kind: ReportKind,
    rows: &[R],
    settings: &Settings,
) -> Result<(), CliError> {
    let path = report::write_report(dir, kind, rows, &Local::now())?;
    output::print_output(&path.display().to_string(), settings.quiet);
    Ok(())
}
