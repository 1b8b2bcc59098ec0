// ── CSV reports ──
//
// Every report is a header line followed by one record per row, written to
// `<dir>/<Prefix>_<YYYY_MM_DD_HH_MM_SS>.csv`. The header is written even
// when there are no rows.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use tracing::info;

use crate::error::CoreError;

/// Timestamp layout embedded in report file names.
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

/// A flat record with a fixed column set.
///
/// `cells` must yield exactly one value per entry in `COLUMNS`, in order.
pub trait ReportRow {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<&str>;
}

/// The reports this tool produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    OrgAps,
    OrgInventory,
    SiteAps,
    AppleClients,
}

impl ReportKind {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::OrgAps => "AP_Inventory_Org",
            Self::OrgInventory => "Devices",
            Self::SiteAps => "AP_Inventory_Site",
            Self::AppleClients => "Apple_Devices_Site",
        }
    }
}

pub fn report_path<Tz: TimeZone>(dir: &Path, kind: ReportKind, at: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    dir.join(format!(
        "{}_{}.csv",
        kind.prefix(),
        at.format(TIMESTAMP_FORMAT)
    ))
}

/// Write header plus rows to any sink.
pub fn write_rows<R: ReportRow, W: io::Write>(sink: W, rows: &[R]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);
    writer.write_record(R::COLUMNS)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;
    Ok(())
}

/// Create `dir` if needed and write a timestamped report file into it.
///
/// Returns the path of the file written.
pub fn write_report<R: ReportRow, Tz: TimeZone>(
    dir: &Path,
    kind: ReportKind,
    rows: &[R],
    at: &DateTime<Tz>,
) -> Result<PathBuf, CoreError>
where
    Tz::Offset: std::fmt::Display,
{
    fs::create_dir_all(dir).map_err(|source| CoreError::ReportDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = report_path(dir, kind, at);
    let file = File::create(&path).map_err(|e| CoreError::Report {
        path: path.clone(),
        source: e.into(),
    })?;
    write_rows(file, rows).map_err(|source| CoreError::Report {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), rows = rows.len(), "report written");
    Ok(path)
}
