use alloy::primitives::BlockNumber;
use alloy::rpc::types::Log;
use futures_util::stream::BoxStream;

use crate::error::IndexerError;
use crate::source::filter::{ChunkFilter, StreamFilter};

/// Where logs come from. Only confirmed logs (with a block number) are handed out.
#[async_trait::async_trait]
pub trait Source: Send + Sync {
    async fn head(&self) -> Result<BlockNumber, IndexerError>;
    async fn chunk(&self, filter: ChunkFilter) -> Result<Vec<Log>, IndexerError>;
    /// Live logs in block order. The stream ending means the subscription was lost.
    async fn stream(&self, filter: StreamFilter) -> Result<BoxStream<'static, Log>, IndexerError>;
}
