//! Interactive UI entry.

use anyhow::Result;
use booktrack_core::config::Config;

#[cfg(feature = "tui")]
pub fn run(config: &Config) -> Result<()> {
    booktrack_tui::run_interactive(config)
}

#[cfg(not(feature = "tui"))]
pub fn run(_config: &Config) -> Result<()> {
    anyhow::bail!("This build has no interactive UI. Run `booktrack --help` for the commands.")
}
