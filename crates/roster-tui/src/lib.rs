//! Full-screen TUI for Roster.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use roster_core::backend::Backend;
use roster_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive user manager until the user quits.
///
/// Must be called from within a multi-threaded tokio runtime; backend calls
/// are spawned onto it while this thread drives the terminal.
///
/// # Errors
/// Returns an error if there is no terminal or the terminal fails.
pub fn run(config: Config, backend: Backend) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The user manager requires a terminal.\n\
             Use `roster users list` for non-interactive output."
        );
    }

    tracing::info!("starting tui");
    let mut runtime = TuiRuntime::new(config, backend)?;
    runtime.run()
}
