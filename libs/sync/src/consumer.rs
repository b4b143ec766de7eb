use std::{future::Future, pin::Pin, sync::Arc};
use tokio::sync::{broadcast, mpsc};

use crate::Exit;

pub type ConsumerCallback<T, E> =
    dyn Fn(T) -> Pin<Box<dyn Future<Output = Result<(), E>> + Send>> + Send + Sync + 'static;

pub struct Consumer<T: 'static, E: 'static> {
    consumer_callback: Arc<ConsumerCallback<T, E>>,
    rx: mpsc::Receiver<T>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl<T, E> Consumer<T, E> {
    pub fn new(
        consumer_callback: Arc<ConsumerCallback<T, E>>,
        rx: mpsc::Receiver<T>,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self { consumer_callback, rx, shutdown_rx }
    }
}

impl<T: Send + 'static, E: Send + 'static> Consumer<T, E> {
    /// Spawns the consumer loop. Messages are handled one at a time, in channel order;
    /// the first callback error stops the loop and is returned through the handle.
    pub fn spawn<F, Fut>(
        rx: mpsc::Receiver<T>,
        shutdown_tx: broadcast::Sender<()>,
        consumer_callback_factory: F,
    ) -> tokio::task::JoinHandle<Result<Exit, E>>
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        let consumer_callback: Arc<ConsumerCallback<T, E>> =
            Arc::new(move |msg: T| Box::pin(consumer_callback_factory(msg)));

        let mut consumer = Consumer::new(consumer_callback, rx, shutdown_tx.subscribe());

        tokio::spawn(async move { consumer.run().await })
    }
}

impl<T, E> Consumer<T, E> {
    pub async fn run(&mut self) -> Result<Exit, E> {
        loop {
            tokio::select! {
                // Receive message from the channel
                maybe_msg = self.rx.recv() => {
                    match maybe_msg {
                        Some(data) => {
                            // Execute the callback
                            let consumer_callback = Arc::clone(&self.consumer_callback);
                            consumer_callback(data).await?;
                        }
                        None => {
                            // Channel closed and drained
                            return Ok(Exit::Exhausted);
                        }
                    }
                }
                _ = self.shutdown_rx.recv() => {
                    // Shutdown signal received
                    return Ok(Exit::Shutdown);
                }
            }
        }
    }
}
