use crate::error::IndexerError;
use crate::source::filter::{ChunkFilter, StreamFilter};
use crate::source::handle::Source;
use alloy::primitives::BlockNumber;
use alloy::rpc::types::Log;
use chain::rpc::{NodeClient, blockmed_filter};
use futures_util::{
    StreamExt, future,
    stream::{self, BoxStream},
};

pub struct LogSource {
    node_client: NodeClient,
}

impl LogSource {
    pub fn new(node_client: NodeClient) -> Self {
        Self { node_client }
    }
}

#[async_trait::async_trait]
impl Source for LogSource {
    async fn head(&self) -> Result<BlockNumber, IndexerError> {
        Ok(self.node_client.get_latest_block_number().await?)
    }

    async fn chunk(&self, filter: ChunkFilter) -> Result<Vec<Log>, IndexerError> {
        let logs_filter = blockmed_filter(filter.address)
            .from_block(filter.from_block_number)
            .to_block(filter.to_block_number);

        let logs_chunk = self
            .node_client
            .get_logs(&logs_filter)
            .await?
            .into_iter()
            // NOTE: Pending logs are re-emitted with a block number once their tx is mined.
            .filter(|log| log.block_number.is_some())
            .collect();

        Ok(logs_chunk)
    }

    async fn stream(&self, filter: StreamFilter) -> Result<BoxStream<'static, Log>, IndexerError> {
        let logs_filter = blockmed_filter(filter.address).from_block(filter.from_block_number);

        let logs_stream = self
            .node_client
            .watch_logs(&logs_filter, filter.poll_interval)
            .await?
            .flat_map(stream::iter)
            // Skip pending logs now, they come back once confirmed.
            .filter(|log| future::ready(log.block_number.is_some()));

        Ok(logs_stream.boxed())
    }
}
