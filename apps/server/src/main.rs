//! markdrop server, a personal drop-and-serve markdown host.
//!
//! Accepts drag-and-drop uploads from the bundled web widget, persists them
//! as markdown files on disk, and serves them back as rendered HTML.

mod commands;
mod routes;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
