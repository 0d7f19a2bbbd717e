//! additive - terminal additive synthesizer with drawable envelopes
//!
//! Run with: cargo run --bin additive
//! Set ADDITIVE_LOG=<path> to write logs (filtered by RUST_LOG) to a file.

mod app;
mod ui;

use std::fs::File;

use app::Additive;
use color_eyre::eyre::WrapErr;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging()?;

    Additive::new()
        .overtones(12)
        .glide_ms(30.0)
        .run()
}

/// Logs go to a file so they do not tear through the terminal UI.
fn init_logging() -> color_eyre::Result<()> {
    let Some(path) = std::env::var_os("ADDITIVE_LOG") else {
        return Ok(());
    };

    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.to_string_lossy()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
