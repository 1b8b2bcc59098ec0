//! Packaging assets under `$OUT_DIR`: man pages and shell completions.

use std::error::Error;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::Shell;

// cli.rs only depends on clap and clap_complete, both build-dependencies.
#[path = "src/cli.rs"]
mod cli;

const PACKAGED_SHELLS: [Shell; 3] = [Shell::Bash, Shell::Fish, Shell::Zsh];

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or("OUT_DIR not set by Cargo")?);

    // `mistly.1`, `mistly-report.1`, `mistly-report-site-aps.1`, ...
    let man_dir = out_dir.join("man");
    std::fs::create_dir_all(&man_dir)?;
    clap_mangen::generate_to(cli::Cli::command(), &man_dir)?;

    let completion_dir = out_dir.join("completions");
    std::fs::create_dir_all(&completion_dir)?;
    let mut cmd = cli::Cli::command();
    for shell in PACKAGED_SHELLS {
        clap_complete::generate_to(shell, &mut cmd, "mistly", &completion_dir)?;
    }
    Ok(())
}
