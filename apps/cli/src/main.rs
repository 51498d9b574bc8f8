//! adrindex CLI: builds a tag-grouped index of Architecture Decision Records.
//!
//! Reads AsciiDoc ADRs from a directory, validates their metadata, and prints
//! the rendered index to stdout. Any invalid document fails the whole run.

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
