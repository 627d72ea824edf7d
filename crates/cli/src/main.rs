mod cli;
mod commands;
mod logging;

use std::io;

use anyhow::Result;
use anne_core::Annotator;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = if cli.verbose {
        true
    } else {
        logging::env_flag()
    };
    logging::init(verbose);
    let annotator = match cli.config {
        Some(path) => Annotator::new(path),
        None => Annotator::default(),
    };
    let mut out = io::stdout().lock();
    match cli.command {
        Command::Show { limit } => commands::show(&annotator, limit, &mut out),
        Command::Status => commands::status(&annotator, &mut out),
        Command::Annotate { index, label } => {
            commands::annotate(&annotator, &index, &label, &mut out)
        }
        Command::Check => commands::check(&annotator, &mut out),
    }
}
