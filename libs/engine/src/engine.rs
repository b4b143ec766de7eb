use crate::args::Args;
use crate::context::Context;
use crate::error::IndexerError;
use crate::gapfiller;
use crate::live::pubsub::{publisher, subscriber};
use crate::live::state::logic::State;
use crate::retry::retry_transient;
use crate::source::filter::StreamFilter;
use chain::event::DecodedEvent;
use std::future::Future;
use sync::Exit;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Handle to the running indexer loop.
pub struct Engine {
    shutdown_tx: broadcast::Sender<()>,
    handle: JoinHandle<Result<(), IndexerError>>,
}

impl Engine {
    /// Spawns the indexer loop. Must be called from within a tokio runtime.
    pub fn start(args: Args, context: Context) -> Engine {
        let (shutdown_tx, _) = broadcast::channel::<()>(1);
        let shutdown_rx = shutdown_tx.subscribe();

        let handle = tokio::spawn(run(args, context, shutdown_tx.clone(), shutdown_rx));

        Self { shutdown_tx, handle }
    }

    // Send shutdown signal and wait for the loop and its tasks to finish
    pub async fn shutdown(self) -> Result<(), IndexerError> {
        let _ = self.shutdown_tx.send(());
        self.handle.await?
    }

    /// Runs until `signal` resolves, then shuts down. Returns early if the loop fails.
    pub async fn shutdown_on<F>(mut self, signal: F) -> Result<(), IndexerError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            _ = signal => tracing::info!("Shutdown requested"),
            joined = &mut self.handle => return joined?,
        }
        self.shutdown().await
    }
}

async fn run(
    args: Args,
    context: Context,
    shutdown_tx: broadcast::Sender<()>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), IndexerError> {
    let result = tokio::select! {
        result = run_loop(&args, &context, &shutdown_tx) => result,
        _ = shutdown_rx.recv() => Ok(()),
    };

    // Stop whatever producer or consumer is still around
    let _ = shutdown_tx.send(());

    match &result {
        Ok(()) => tracing::info!("Indexer stopped"),
        Err(e) => tracing::error!("Indexer failed: {e}"),
    }
    result
}

async fn run_loop(
    args: &Args,
    context: &Context,
    shutdown_tx: &broadcast::Sender<()>,
) -> Result<(), IndexerError> {
    loop {
        match run_cycle(args, context, shutdown_tx).await {
            Ok(Exit::Shutdown) => return Ok(()),
            Ok(exit) => {
                tracing::warn!("Live consumer stopped unexpectedly: {exit:?}");
            }
            Err(IndexerError::SubscriptionLost) => {
                tracing::warn!(
                    "Log subscription lost, resubscribing in {:?}",
                    args.resubscribe_delay
                );
            }
            Err(e) => return Err(e),
        }
        tokio::time::sleep(args.resubscribe_delay).await;
    }
}

/// One subscription's lifetime: open the live stream, backfill up to head, then apply live
/// events until the stream ends.
async fn run_cycle(
    args: &Args,
    context: &Context,
    shutdown_tx: &broadcast::Sender<()>,
) -> Result<Exit, IndexerError> {
    // Subscribe first so nothing emitted while backfilling is missed
    let from_block_number = gapfiller::start_block(args, &context.checkpoints).await?;
    let stream_filter = StreamFilter {
        address: context.contract,
        from_block_number,
        poll_interval: args.poll_interval,
    };
    let logs_stream = retry_transient(&args.retry, "Opening log stream", || {
        context.source.stream(stream_filter.clone())
    })
    .await?;

    let (tx, rx) = mpsc::channel::<DecodedEvent>(args.channel_size.max(1));
    let producer_handle = publisher::spawn_event_producer(logs_stream, tx, shutdown_tx.clone());

    // Run collect elements in chunks sync (gap-fill)
    let floor = retry_transient(&args.retry, "Backfill", || {
        gapfiller::chunked_backfill(args, context)
    })
    .await?;

    tracing::info!("Live indexing from block {}", floor.saturating_add(1));

    // Run apply elements live async (live-watcher)
    let consumer_handle = subscriber::spawn_event_consumer(
        rx,
        shutdown_tx.clone(),
        context.projection.clone(),
        State::new(floor),
    );

    let exit = consumer_handle.await??;
    let _ = producer_handle.await;

    match exit {
        // The producer dropped its sender: the stream ended
        Exit::Exhausted => Err(IndexerError::SubscriptionLost),
        exit => Ok(exit),
    }
}
