use chain::event::DecodeError;
use chain::rpc::NodeError;
use tokio::task::JoinError;

#[derive(Debug, thiserror::Error)]
pub enum IndexerError {
    #[error("node unavailable: {0}")]
    NodeUnavailable(String),

    #[error("log subscription lost")]
    SubscriptionLost,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("projection write failed: {0}")]
    ProjectionWrite(#[source] sqlx::Error),

    #[error("checkpoint read failed: {0}")]
    CheckpointRead(#[source] sqlx::Error),

    #[error("indexer task failed: {0}")]
    Join(#[from] JoinError),
}

impl From<NodeError> for IndexerError {
    fn from(e: NodeError) -> Self {
        IndexerError::NodeUnavailable(e.to_string())
    }
}

impl IndexerError {
    /// Errors worth retrying as-is. Everything else needs a restart or a new subscription.
    pub fn is_transient(&self) -> bool {
        matches!(self, IndexerError::NodeUnavailable(_))
    }
}
