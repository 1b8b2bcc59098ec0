//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Instant;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Refuses rather than prompting when stdin is not a terminal.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Prints `Time to run: <n>s` to stderr when dropped, unless quiet.
pub struct RunTimer {
    started: Instant,
    quiet: bool,
}

impl RunTimer {
    pub fn start(quiet: bool) -> Self {
        Self {
            started: Instant::now(),
            quiet,
        }
    }
}

impl Drop for RunTimer {
    fn drop(&mut self) {
        if !self.quiet {
            eprintln!("Time to run: {:.2}s", self.started.elapsed().as_secs_f64());
        }
    }
}
