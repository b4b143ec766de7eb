use alloy::primitives::BlockNumber;
use chain::event::DecodedEvent;

use crate::live::state::event::Event;

#[derive(Debug)]
pub struct State {
    /// Highest block known to be fully applied when the live phase started.
    floor: BlockNumber,
    /// Highest block seen in the live stream so far.
    last_block: Option<BlockNumber>,
}

impl State {
    pub fn new(floor: BlockNumber) -> Self {
        Self { floor, last_block: None }
    }

    pub fn get_floor(&self) -> BlockNumber {
        self.floor
    }

    pub fn get_last_block(&self) -> Option<BlockNumber> {
        self.last_block
    }

    // Logs arrive in block order, so the first event of block N proves every block
    // before N complete.
    pub fn on_event(&mut self, decoded: DecodedEvent) -> Event {
        let block_number = decoded.block_number;
        if block_number <= self.floor {
            return Event::Skip(Box::new(decoded));
        }

        let checkpoint = match self.last_block {
            Some(last_block) if block_number <= last_block => None,
            _ => Some(block_number - 1),
        };
        self.last_block = Some(self.last_block.map_or(block_number, |b| b.max(block_number)));

        Event::Apply { event: Box::new(decoded), checkpoint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;
    use chain::event::{BlockMedEvent, PrescriptionDispensed};

    fn at(block_number: BlockNumber) -> DecodedEvent {
        DecodedEvent {
            block_number,
            transaction_hash: None,
            log_index: None,
            event: BlockMedEvent::PrescriptionDispensed(PrescriptionDispensed {
                id: 1,
                pharmacist: Address::ZERO,
                dispensed_at: 0,
            }),
        }
    }

    fn checkpoint_of(event: Event) -> Option<Option<BlockNumber>> {
        match event {
            Event::Skip(_) => None,
            Event::Apply { checkpoint, .. } => Some(checkpoint),
        }
    }

    #[test]
    fn test_events_at_or_below_floor_are_skipped() {
        let mut state = State::new(10);
        assert_eq!(checkpoint_of(state.on_event(at(3))), None);
        assert_eq!(checkpoint_of(state.on_event(at(10))), None);
        assert_eq!(state.get_last_block(), None);
    }

    #[test]
    fn test_checkpoint_trails_the_newest_block() {
        let mut state = State::new(10);
        assert_eq!(checkpoint_of(state.on_event(at(11))), Some(Some(10)));
        assert_eq!(checkpoint_of(state.on_event(at(11))), Some(None));
        assert_eq!(checkpoint_of(state.on_event(at(14))), Some(Some(13)));
        assert_eq!(state.get_last_block(), Some(14));
        assert_eq!(state.get_floor(), 10);
    }
}
