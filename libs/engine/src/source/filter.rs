use std::time::Duration;

use alloy::primitives::{Address, BlockNumber};

/// Inclusive block range of logs emitted by `address`.
#[derive(Debug, Clone)]
pub struct ChunkFilter {
    pub address: Address,
    pub from_block_number: BlockNumber,
    pub to_block_number: BlockNumber,
}

#[derive(Debug, Clone)]
pub struct StreamFilter {
    pub address: Address,
    pub from_block_number: BlockNumber,
    pub poll_interval: Duration,
}
