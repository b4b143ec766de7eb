use crate::error::IndexerError;
use crate::live::state::{event::Event, logic::State};
use chain::event::DecodedEvent;
use std::sync::Arc;
use store::projection::Projection;
use sync::Exit;
use sync::consumer::Consumer;
use tokio::sync::{Mutex, broadcast, mpsc};

pub async fn consume_event(event: Event, projection: &Projection) -> Result<(), IndexerError> {
    match event {
        Event::Skip(decoded) => {
            tracing::debug!(
                "Consumer skipped {} at block {} (already backfilled)",
                decoded.event.name(),
                decoded.block_number
            );
            Ok(())
        }
        Event::Apply { event, checkpoint } => {
            projection
                .apply_chunk(std::slice::from_ref(event.as_ref()), checkpoint)
                .await
                .map_err(IndexerError::ProjectionWrite)?;
            tracing::info!(
                "Consumer applied {} at block {} (checkpoint {checkpoint:?})",
                event.event.name(),
                event.block_number
            );
            Ok(())
        }
    }
}

/// Spawns the consumer: the only writer while live. A failed write stops it and the
/// error is returned through the handle.
pub fn spawn_event_consumer(
    rx: mpsc::Receiver<DecodedEvent>,
    shutdown_tx: broadcast::Sender<()>,
    projection: Projection,
    state: State,
) -> tokio::task::JoinHandle<Result<Exit, IndexerError>> {
    let shared_state = Arc::new(Mutex::new(state));

    // A closure that returns a future.
    let consumer_callback = move |decoded: DecodedEvent| {
        let state_for_consumer = Arc::clone(&shared_state);
        let projection_for_consumer = projection.clone();
        async move {
            let event = state_for_consumer.lock().await.on_event(decoded);
            consume_event(event, &projection_for_consumer).await.inspect_err(|e| {
                tracing::error!("Consumer failed: {e}");
            })
        }
    };

    // Spawn consumer: consumes decoded events from rx (producer)
    Consumer::spawn(rx, shutdown_tx, consumer_callback)
}
