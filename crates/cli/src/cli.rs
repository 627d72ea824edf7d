use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "anne", version, about = "Pairwise text annotation from the terminal")]
pub struct Cli {
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,
    /// Settings file; defaults to $ANNE_CONFIG or ./config.yaml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every row with its comparison texts and current label
    Show {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print how many rows carry a label
    Status,
    /// Store a label on one row
    Annotate {
        #[arg(allow_hyphen_values = true)]
        index: String,
        label: String,
    },
    /// Validate the settings file and the record store
    Check,
}
