use std::path::PathBuf;

use clap::Parser;

use crate::cli::query::read::Entity;

#[derive(Parser, Debug)]
#[command(about = "Select indexed rows", long_about = None)]
pub struct Query {
    /// SQLite database file
    #[arg(long, env = "INDEXER_DB", default_value = "data/blockmed.db")]
    pub db_path: PathBuf,

    /// Entity to query
    #[arg(short, long, value_enum)]
    pub entity: Entity,

    /// Single row by id (prescriptions and batches)
    #[arg(long)]
    pub id: Option<i64>,

    /// Max rows to print, newest first
    #[arg(long)]
    pub limit: Option<i64>,

    /// Only prescriptions written by this doctor
    #[arg(long)]
    pub doctor: Option<String>,

    /// Only prescriptions for this patient hash
    #[arg(long)]
    pub patient_hash: Option<String>,
}
