//! Interactive UI launcher.

use anyhow::Result;
use vitrola_core::config::Config;
use vitrola_tui::Route;

pub async fn run(config: Config, route: &str) -> Result<()> {
    vitrola_tui::run_tui(config, Route::parse(route)).await
}
