//! Folds decoded events into the `prescriptions` and `batches` tables.

use alloy::primitives::BlockNumber;
use chain::event::{BlockMedEvent, DecodedEvent};
use sqlx::{Error, SqliteConnection};

use crate::batch::model::{BatchFlag, BatchRecall, NewBatch};
use crate::batch::store::Store as BatchStore;
use crate::checkpoint::store::Store as CheckpointStore;
use crate::client::Client;
use crate::prescription::model::{NewPrescription, PrescriptionDispense, PrescriptionUpdate};
use crate::prescription::store::Store as PrescriptionStore;

#[derive(Clone)]
pub struct Projection {
    client: Client,
    prescriptions: PrescriptionStore,
    batches: BatchStore,
}

impl Projection {
    pub fn new(client: Client) -> Self {
        Self {
            prescriptions: PrescriptionStore::new(client.clone()),
            batches: BatchStore::new(client.clone()),
            client,
        }
    }

    pub fn prescriptions(&self) -> &PrescriptionStore {
        &self.prescriptions
    }

    pub fn batches(&self) -> &BatchStore {
        &self.batches
    }

    /// Applies `events` in order and, if given, advances the checkpoint, all in one
    /// transaction. On error nothing is written and the checkpoint stays where it was.
    pub async fn apply_chunk(
        &self,
        events: &[DecodedEvent],
        checkpoint: Option<BlockNumber>,
    ) -> Result<(), Error> {
        let mut tx = self.client.pool().begin().await?;

        for event in events {
            apply_event(&mut *tx, event).await?;
        }

        if let Some(block_number) = checkpoint {
            CheckpointStore::advance(&mut *tx, block_number).await?;
        }

        tx.commit().await
    }
}

pub async fn apply_event(conn: &mut SqliteConnection, decoded: &DecodedEvent) -> Result<(), Error> {
    let raw_event = decoded.raw_meta();
    match &decoded.event {
        BlockMedEvent::PrescriptionCreated(e) => {
            PrescriptionStore::apply_created(conn, &NewPrescription::from_event(e, raw_event)).await
        }
        BlockMedEvent::PrescriptionUpdated(e) => {
            PrescriptionStore::apply_updated(conn, &PrescriptionUpdate::from_event(e, raw_event))
                .await
        }
        BlockMedEvent::PrescriptionDispensed(e) => {
            PrescriptionStore::apply_dispensed(conn, &PrescriptionDispense::from_event(e, raw_event))
                .await
        }
        BlockMedEvent::BatchCreated(e) => {
            BatchStore::apply_created(conn, &NewBatch::from_event(e, raw_event)).await
        }
        BlockMedEvent::BatchRecalled(e) => {
            BatchStore::apply_recalled(conn, &BatchRecall::from_event(e, raw_event)).await
        }
        BlockMedEvent::BatchFlagged(e) => {
            BatchStore::apply_flagged(conn, &BatchFlag::from_event(e, raw_event)).await
        }
    }
}
