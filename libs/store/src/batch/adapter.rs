use chain::event::{BatchCreated, BatchFlagged, BatchRecalled};

use crate::batch::model::{BatchFlag, BatchRecall, NewBatch};
use crate::utils::address_to_string;

impl NewBatch {
    pub fn from_event(event: &BatchCreated, raw_event: String) -> Self {
        Self {
            id: event.id,
            batch_number: event.batch_number.clone(),
            medicine_name: event.medicine_name.clone(),
            manufacturer: address_to_string(&event.manufacturer),
            created_at: event.created_at,
            raw_event,
        }
    }
}

impl BatchRecall {
    pub fn from_event(event: &BatchRecalled, raw_event: String) -> Self {
        Self {
            id: event.id,
            recalled_at: event.recalled_at,
            reason: event.reason.clone(),
            recalled_by: address_to_string(&event.recalled_by),
            raw_event,
        }
    }
}

impl BatchFlag {
    pub fn from_event(event: &BatchFlagged, raw_event: String) -> Self {
        Self {
            id: event.id,
            flagged_at: event.flagged_at,
            reason: event.reason.clone(),
            flagged_by: address_to_string(&event.flagged_by),
            raw_event,
        }
    }
}
