use clap::{Parser, Subcommand};

use crate::cli::query::args::Query;

use super::run::args::Args;

#[derive(Parser, Debug)]
#[command(name = "blockmed-indexer")]
#[command(about = "BlockMed event indexer and read API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the indexer and the read API
    Run(Args),
    /// Print indexed rows as JSON
    Select(Query),
}
