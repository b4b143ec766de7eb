use std::time::Duration;

use alloy::primitives::BlockNumber;

use crate::retry::Backoff;

#[derive(Debug, Clone)]
pub struct Args {
    /// First block to index when the database has no checkpoint yet.
    pub from_block: BlockNumber,
    pub backfill_chunk_size: u64,
    pub poll_interval: Duration,
    pub channel_size: usize,
    pub retry: Backoff,
    /// Pause before reopening a lost log subscription.
    pub resubscribe_delay: Duration,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            from_block: 0,
            backfill_chunk_size: 2000,
            poll_interval: Duration::from_millis(1000),
            channel_size: 1024,
            retry: Backoff::default(),
            resubscribe_delay: Duration::from_secs(1),
        }
    }
}
