//! Clap derive structures for the `mistly` CLI.
//!
//! Also compiled by `build.rs` for man page generation, so this file may
//! only depend on `clap` and `clap_complete`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// mistly -- inventory reports and token housekeeping for Mist
#[derive(Debug, Parser)]
#[command(
    name = "mistly",
    version,
    about = "Query the Mist cloud API and dump inventory to CSV",
    long_about = "Query the Mist cloud management API from the command line.\n\n\
        Credentials come from MIST_* environment variables, falling back to a\n\
        JSON config file. Reports are written as timestamped CSV files.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// API base URL (regional clouds use e.g. https://api.eu.mist.com)
    #[arg(
        long,
        env = "MIST_BASE_URL",
        default_value = "https://api.mist.com",
        global = true
    )]
    pub base_url: String,

    /// JSON credentials file (default: ./config.json, then the user config dir)
    #[arg(long, short = 'c', env = "MIST_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "MIST_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MIST_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Api(ApiCommand),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Commands that load credentials and talk to the Mist API.
#[derive(Debug, Subcommand)]
pub enum ApiCommand {
    /// Check DNS, connectivity, and the configured token
    Check,

    /// Organisation stats and overview
    Org(OrgArgs),

    /// Write inventory and client reports to CSV
    #[command(alias = "r")]
    Report(ReportArgs),

    /// Manage API tokens for the current user
    Tokens(TokensArgs),
}

// ── Org ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OrgArgs {
    #[command(subcommand)]
    pub command: OrgCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrgCommand {
    /// Device and site counts
    Summary {
        /// Org id (default: MIST_ORG_ID / config `org_id`)
        org_id: Option<String>,
    },

    /// Sites, WLANs, and inventory at a glance
    Overview {
        /// Org id (default: MIST_ORG_ID / config `org_id`)
        org_id: Option<String>,
    },
}

// ── Report ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,

    /// Directory for CSV output (created if missing)
    #[arg(long, default_value = "reports", global = true)]
    pub reports_dir: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Access points across the org, with site names
    OrgAps(OrgReportArgs),

    /// Every claimed device across the org, with site names
    OrgInventory(OrgReportArgs),

    /// Access points at one site
    SiteAps {
        /// Site id
        site_id: String,
    },

    /// Apple clients seen at a site, one row per MAC
    AppleClients {
        /// Site id (default: MIST_SITE_ID / config `site_id`)
        site_id: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct OrgReportArgs {
    /// Org id (default: MIST_ORG_ID / config `org_id`)
    pub org_id: Option<String>,

    /// Fail when a device references a site missing from the org
    #[arg(long)]
    pub strict: bool,
}

// ── Tokens ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TokensArgs {
    #[command(subcommand)]
    pub command: TokensCommand,
}

#[derive(Debug, Subcommand)]
pub enum TokensCommand {
    /// List tokens (keys are masked by the API)
    #[command(alias = "ls")]
    List,

    /// Create a new token and print its key
    Create,

    /// Delete a token by id
    #[command(alias = "rm")]
    Delete {
        /// Token id
        token_id: String,
    },

    /// Delete every token except the one in use
    Tidy,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
