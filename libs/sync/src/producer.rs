use std::{future::Future, pin::Pin, sync::Arc};
use tokio::sync::{broadcast, mpsc};

use crate::Exit;

/// Yields the next message, or `None` once the underlying source is exhausted.
pub type ProducerCallback<T> =
    dyn Fn() -> Pin<Box<dyn Future<Output = Option<T>> + Send>> + Send + Sync + 'static;

pub struct Producer<T: 'static> {
    producer_callback: Arc<ProducerCallback<T>>,
    tx: mpsc::Sender<T>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl<T> Producer<T> {
    pub fn new(
        producer_callback: Arc<ProducerCallback<T>>,
        tx: mpsc::Sender<T>,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self { producer_callback, tx, shutdown_rx }
    }
}

impl<T: Send + 'static> Producer<T> {
    /// Spawns the producer loop. The shutdown subscription is taken before spawning,
    /// so a signal sent right after this call returns is never missed.
    pub fn spawn<F, Fut>(
        tx: mpsc::Sender<T>,
        shutdown_tx: broadcast::Sender<()>,
        producer_callback_factory: F,
    ) -> tokio::task::JoinHandle<Exit>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<T>> + Send + 'static,
    {
        let producer_callback: Arc<ProducerCallback<T>> =
            Arc::new(move || Box::pin(producer_callback_factory()));

        let mut producer = Producer::new(producer_callback, tx, shutdown_tx.subscribe());

        tokio::spawn(async move {
            let exit = producer.run().await;
            tracing::debug!("Producer stopped: {exit:?}");
            exit
        })
    }
}

impl<T> Producer<T> {
    pub async fn run(&mut self) -> Exit {
        loop {
            tokio::select! {
                message = async {
                    // Execute the callback
                    let callback = Arc::clone(&self.producer_callback);
                    callback().await
                } => {
                    let Some(message) = message else {
                        // Source exhausted, dropping tx closes the channel
                        return Exit::Exhausted;
                    };
                    // Send message to the channel
                    if self.tx.send(message).await.is_err() {
                        // The receiver dropped
                        return Exit::Disconnected;
                    }
                }
                _ = self.shutdown_rx.recv() => {
                    // Shutdown signal received
                    return Exit::Shutdown;
                }
            }
        }
    }
}
