use alloy::primitives::BlockNumber;
use chain::event::DecodedEvent;

#[derive(Debug)]
pub enum Event {
    /// Already applied by the backfill.
    Skip(Box<DecodedEvent>),
    /// Apply the event and, if set, move the checkpoint to `checkpoint` in the same
    /// transaction.
    Apply { event: Box<DecodedEvent>, checkpoint: Option<BlockNumber> },
}
