// mistly-core: workflows and reports on top of mistly-api.
//
// Each domain module (inventory, clients, org, tokens) fetches raw JSON
// through the facade, decodes the fields it needs, and builds flat report
// rows. `report` turns those rows into timestamped CSV files.

pub mod clients;
pub mod error;
pub mod inventory;
pub mod model;
pub mod org;
pub mod report;
pub mod tokens;

// ── Primary re-exports ──────────────────────────────────────────────
pub use clients::ClientRow;
pub use error::CoreError;
pub use inventory::{DeviceFilter, OrgDeviceRow, SiteDeviceRow, UnknownSitePolicy};
pub use org::OrgOverview;
pub use report::{ReportKind, ReportRow};
pub use tokens::TidyPlan;

pub use model::{ApiToken, ClientSession, Device, OrgStats, SelfInfo, Site, Wlan};
