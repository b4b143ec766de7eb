use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::Address;
use clap::Parser;

use crate::cli::read::parse_address;

#[derive(Parser, Debug)]
#[command(about = "Start the BlockMed indexer and read API", long_about = None)]
pub struct Args {
    /// Node JSON-RPC endpoint
    #[arg(long, env = "RPC_URL", default_value = "http://127.0.0.1:8545")]
    pub rpc_url: String,

    /// BlockMedV2 contract to index
    #[arg(
        long,
        env = "CONTRACT_ADDRESS",
        default_value = "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        value_parser = parse_address
    )]
    pub contract_address: Address,

    /// Interface the read API binds to
    #[arg(long, env = "INDEXER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the read API listens on
    #[arg(long, env = "INDEXER_PORT", default_value_t = 3002)]
    pub port: u16,

    /// SQLite database file, created if missing
    #[arg(long, env = "INDEXER_DB", default_value = "data/blockmed.db")]
    pub db_path: PathBuf,

    /// First block to index when the database is empty
    #[arg(long, env = "FROM_BLOCK", default_value_t = 0)]
    pub from_block: u64,

    /// Blocks per eth_getLogs request during backfill
    #[arg(long, env = "BACKFILL_CHUNK_SIZE", default_value_t = 2000)]
    pub backfill_chunk_size: u64,

    /// Live log filter poll interval in milliseconds
    #[arg(long, env = "POLL_INTERVAL_MS", default_value_t = 1000)]
    pub poll_interval: u64,

    /// Capacity of the live event channel
    #[arg(long, env = "CHANNEL_SIZE", default_value_t = 1024)]
    pub channel_size: usize,
}

impl From<&Args> for engine::args::Args {
    fn from(args: &Args) -> Self {
        // map CLI args to Engine Args
        engine::args::Args {
            from_block: args.from_block,
            backfill_chunk_size: args.backfill_chunk_size,
            poll_interval: Duration::from_millis(args.poll_interval),
            channel_size: args.channel_size,
            ..engine::args::Args::default()
        }
    }
}
