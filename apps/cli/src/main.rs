//! Ordliste CLI: course dictionary generator.
//!
//! Reads the English/Norwegian word list and writes a formatted Markdown
//! page with one lookup table per direction.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
