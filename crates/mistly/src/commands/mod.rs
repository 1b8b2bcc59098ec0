//! Command dispatch: bridges CLI args -> core workflows -> output formatting.

pub mod check;
pub mod org;
pub mod report;
pub mod tokens;
pub mod util;

use crate::cli::ApiCommand;
use crate::error::CliError;
use crate::settings::Settings;

/// Dispatch a network-bound command to its handler.
///
/// Every handler prints its elapsed time on the way out.
pub async fn dispatch(cmd: ApiCommand, settings: &Settings) -> Result<(), CliError> {
    let _timer = util::RunTimer::start(settings.quiet);
    match cmd {
        ApiCommand::Check => check::handle(settings).await,
        ApiCommand::Org(args) => org::handle(args, settings).await,
        ApiCommand::Report(args) => report::handle(args, settings).await,
        ApiCommand::Tokens(args) => tokens::handle(args, settings).await,
    }
}
