use alloy::rpc::types::Log;
use chain::event::DecodedEvent;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use std::sync::Arc;
use sync::Exit;
use sync::producer::Producer;
use tokio::sync::{Mutex, broadcast, mpsc};

use crate::decode;

/// Spawns the producer: decodes logs from the live stream and sends them to the
/// consumer. The task exits with [`Exit::Exhausted`] once the stream ends.
pub fn spawn_event_producer(
    logs_stream: BoxStream<'static, Log>,
    tx: mpsc::Sender<DecodedEvent>,
    shutdown_tx: broadcast::Sender<()>,
) -> tokio::task::JoinHandle<Exit> {
    // Wrap in a Arc + Mutex for interior mutability.
    // * Arc, allows sharing across async tasks/closures.
    // * Mutex, gives async mutable access:
    let shared_logs_stream = Arc::new(Mutex::new(logs_stream));

    // A closure that returns a future
    let producer_callback = move || {
        let logs_stream_for_producer = Arc::clone(&shared_logs_stream);
        async move {
            let mut logs_stream = logs_stream_for_producer.lock().await;
            while let Some(log) = logs_stream.next().await {
                if let Some(decoded) = decode::decode_or_skip(&log) {
                    return Some(decoded);
                }
            }
            tracing::warn!("Live log stream ended");
            None
        }
    };

    Producer::spawn(tx, shutdown_tx, producer_callback)
}
