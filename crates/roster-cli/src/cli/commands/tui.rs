//! Interactive mode.

use anyhow::{Context, Result};
use roster_core::backend::Backend;
use roster_core::config::Config;

pub fn run(config: Config, backend: Backend) -> Result<()> {
    roster_tui::run(config, backend).context("interactive session failed")
}
