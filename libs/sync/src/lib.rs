pub mod consumer;
pub mod producer;

/// Why a producer or consumer task stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The shutdown signal was received.
    Shutdown,
    /// The producer's source ran dry, or the consumer drained a closed channel.
    Exhausted,
    /// The producer's receiver was dropped.
    Disconnected,
}
