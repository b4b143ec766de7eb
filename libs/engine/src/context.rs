use std::sync::Arc;

use alloy::primitives::Address;
use store::checkpoint::store::Store as CheckpointStore;
use store::client::Client;
use store::projection::Projection;

use crate::source::handle::Source;

/// Everything the indexer loop and the read API share.
#[derive(Clone)]
pub struct Context {
    pub contract: Address,
    pub source: Arc<dyn Source>,
    pub projection: Projection,
    pub checkpoints: CheckpointStore,
}

impl Context {
    pub fn new(contract: Address, source: Arc<dyn Source>, client: &Client) -> Self {
        Self {
            contract,
            source,
            projection: Projection::new(client.clone()),
            checkpoints: CheckpointStore::new(client.clone()),
        }
    }
}
