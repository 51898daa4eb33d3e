//! Full-screen TUI for browsing, buying, and managing albums.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod routes;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use features::{collection, home, landing, login, not_found, wallet};
pub use routes::Route;
pub use runtime::TuiRuntime;
use vitrola_core::config::Config;

/// Runs the interactive TUI starting at `start`.
///
/// # Errors
/// Returns an error if stderr is not a terminal, the service clients cannot
/// be built, or the terminal fails.
pub async fn run_tui(config: Config, start: Route) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive UI requires a terminal.\n\
             Use subcommands like `vitrola albums search <text>` for non-interactive use."
        );
    }

    tracing::info!(route = %start, "starting tui");
    let mut runtime = TuiRuntime::new(config, start)?;
    runtime.run()
}
