mod actions;
mod api;
mod app;
mod config;
mod preview;
mod session;
mod state;
mod tasks;
mod types;
mod ui;
mod utils;

use app::App;
use color_eyre::Result;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;

/// The terminal is owned by the UI, so log output goes to a file.
/// Readable with e.g. `tail -f $TMPDIR/summary-admin-tui.log`.
fn init_logging() {
    let path = std::env::temp_dir().join("summary-admin-tui.log");
    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
        Builder::from_env(Env::default().default_filter_or("info"))
            .target(Target::Pipe(Box::new(file)))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    color_eyre::install()?;

    // Config or session-store problems surface before the terminal switches
    // to the alternate screen
    let app = App::new()?;

    let terminal = ratatui::init();
    let app_result = app.run(terminal).await;
    ratatui::restore();
    app_result
}
