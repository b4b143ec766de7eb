use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use sync::Exit;
use sync::producer::Producer;
use tokio::sync::{broadcast, mpsc};
use tokio::time::Duration;

#[tokio::test]
async fn test_producer_stops_when_source_is_exhausted() {
    let (tx, mut rx) = mpsc::channel(16);
    let (shutdown_tx, _) = broadcast::channel(1);

    let next = Arc::new(AtomicU64::new(0));
    let producer_handle = Producer::spawn(tx, shutdown_tx, move || {
        let next = Arc::clone(&next);
        async move {
            let n = next.fetch_add(1, Ordering::SeqCst);
            (n < 5).then_some(n)
        }
    });

    let mut collected = Vec::new();
    while let Some(n) = rx.recv().await {
        collected.push(n);
    }

    assert_eq!(collected, vec![0, 1, 2, 3, 4]);
    assert_eq!(producer_handle.await.ok(), Some(Exit::Exhausted));
}

#[tokio::test]
async fn test_producer_stops_on_shutdown() {
    let (tx, mut rx) = mpsc::channel(100);
    let (shutdown_tx, _) = broadcast::channel(1);

    let producer_handle = Producer::spawn(tx, shutdown_tx.clone(), || async {
        // Simulate async work
        tokio::time::sleep(Duration::from_millis(50)).await;
        Some("tick".to_string())
    });

    tokio::time::sleep(Duration::from_millis(300)).await;
    let _ = shutdown_tx.send(());

    assert_eq!(producer_handle.await.ok(), Some(Exit::Shutdown));

    // Everything produced before shutdown is still delivered
    let mut collected = Vec::new();
    while let Some(item) = rx.recv().await {
        collected.push(item);
    }
    assert!(!collected.is_empty());
}

#[tokio::test]
async fn test_producer_stops_when_receiver_is_dropped() {
    let (tx, rx) = mpsc::channel(1);
    let (shutdown_tx, _) = broadcast::channel(1);
    drop(rx);

    let producer_handle = Producer::spawn(tx, shutdown_tx, || async { Some(1u8) });

    assert_eq!(producer_handle.await.ok(), Some(Exit::Disconnected));
}
