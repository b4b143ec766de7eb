//! In-memory [`Source`] for driving the indexer without a node.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use alloy::primitives::BlockNumber;
use alloy::rpc::types::Log;
use futures_util::StreamExt;
use futures_util::stream::{self, BoxStream};
use tokio::sync::mpsc;

use crate::error::IndexerError;
use crate::source::filter::{ChunkFilter, StreamFilter};
use crate::source::handle::Source;

#[derive(Default)]
pub struct MemorySource {
    head: AtomicU64,
    logs: Mutex<Vec<Log>>,
    streams: Mutex<VecDeque<mpsc::UnboundedReceiver<Log>>>,
    chunks: Mutex<Vec<(BlockNumber, BlockNumber)>>,
    unavailable: AtomicU32,
    stream_calls: AtomicU32,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_head(&self, block_number: BlockNumber) {
        self.head.store(block_number, Ordering::SeqCst);
    }

    /// Adds a log to the history served by `chunk`.
    pub fn push_log(&self, log: Log) {
        lock(&self.logs).push(log);
    }

    /// Queues a live subscription for the next `stream` call. Logs sent through the
    /// returned sender are streamed; dropping it ends the stream.
    pub fn open_stream(&self) -> mpsc::UnboundedSender<Log> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.streams).push_back(rx);
        tx
    }

    /// Makes the next `failures` calls to `head` fail as if the node were down.
    pub fn fail_head(&self, failures: u32) {
        self.unavailable.store(failures, Ordering::SeqCst);
    }

    /// Ranges requested through `chunk`, in call order.
    pub fn chunks(&self) -> Vec<(BlockNumber, BlockNumber)> {
        lock(&self.chunks).clone()
    }

    pub fn stream_calls(&self) -> u32 {
        self.stream_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Source for MemorySource {
    async fn head(&self) -> Result<BlockNumber, IndexerError> {
        let failing = self
            .unavailable
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(IndexerError::NodeUnavailable("connection refused".to_string()));
        }
        Ok(self.head.load(Ordering::SeqCst))
    }

    async fn chunk(&self, filter: ChunkFilter) -> Result<Vec<Log>, IndexerError> {
        lock(&self.chunks).push((filter.from_block_number, filter.to_block_number));

        let range = filter.from_block_number..=filter.to_block_number;
        let logs = lock(&self.logs)
            .iter()
            .filter(|log| log.address() == filter.address)
            .filter(|log| log.block_number.is_some_and(|n| range.contains(&n)))
            .cloned()
            .collect();
        Ok(logs)
    }

    async fn stream(&self, _filter: StreamFilter) -> Result<BoxStream<'static, Log>, IndexerError> {
        self.stream_calls.fetch_add(1, Ordering::SeqCst);

        match lock(&self.streams).pop_front() {
            Some(rx) => Ok(stream::unfold(rx, |mut rx| async move {
                rx.recv().await.map(|log| (log, rx))
            })
            .boxed()),
            // No scripted subscription: stay silent forever
            None => Ok(stream::pending().boxed()),
        }
    }
}
