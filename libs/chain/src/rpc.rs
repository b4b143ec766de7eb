use std::time::Duration;

use alloy::primitives::{Address, BlockNumber};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::client::RpcClient;
use alloy::rpc::types::{Filter, Log};
use alloy::transports::http::reqwest::Url;
use alloy::transports::{RpcError, TransportErrorKind};
use futures_util::StreamExt;
use futures_util::stream::BoxStream;

use crate::abi;

pub type NodeError = RpcError<TransportErrorKind>;

/// Read-only JSON-RPC client. The indexer never signs, so no wallet filler is installed.
#[derive(Clone)]
pub struct NodeClient {
    provider: DynProvider,
}

impl NodeClient {
    pub fn new(rpc_url: Url) -> Self {
        let rpc_client = RpcClient::new_http(rpc_url);
        let provider = ProviderBuilder::new().connect_client(rpc_client).erased();
        Self { provider }
    }

    pub fn borrow_provider(&self) -> &DynProvider {
        &self.provider
    }

    pub async fn get_latest_block_number(&self) -> Result<BlockNumber, NodeError> {
        self.provider.get_block_number().await
    }

    pub async fn get_logs(&self, filter: &Filter) -> Result<Vec<Log>, NodeError> {
        self.provider.get_logs(filter).await
    }

    /// Installs a log filter on the node and polls it for changes.
    /// The stream ends when polling fails (e.g. the node dropped the filter).
    pub async fn watch_logs(
        &self,
        filter: &Filter,
        poll_interval: Duration,
    ) -> Result<BoxStream<'static, Vec<Log>>, NodeError> {
        self.provider
            .watch_logs(filter)
            .await
            .map(|poller_builder| poller_builder.with_poll_interval(poll_interval).into_stream().boxed())
    }
}

/// Base filter matching every BlockMed event emitted by `address`.
pub fn blockmed_filter(address: Address) -> Filter {
    Filter::new().address(address).event_signature(abi::event_signatures())
}
