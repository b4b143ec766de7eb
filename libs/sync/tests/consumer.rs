use std::sync::Arc;
use sync::Exit;
use sync::consumer::Consumer;
use tokio::sync::{Mutex, broadcast, mpsc};

#[tokio::test]
async fn test_consumer_handles_messages_in_order() {
    let (tx, rx) = mpsc::channel(16);
    let (shutdown_tx, _) = broadcast::channel(1);

    let seen: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    let consumer_handle = Consumer::spawn(rx, shutdown_tx, move |n: u32| {
        let seen = Arc::clone(&seen_clone);
        async move {
            seen.lock().await.push(n);
            Ok::<_, String>(())
        }
    });

    for n in 1..=4 {
        tx.send(n).await.expect("send");
    }
    drop(tx);

    let exit = consumer_handle.await.expect("join");
    assert_eq!(exit, Ok(Exit::Exhausted));
    assert_eq!(*seen.lock().await, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_consumer_stops_on_first_error() {
    let (tx, rx) = mpsc::channel(16);
    let (shutdown_tx, _) = broadcast::channel(1);

    let seen: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    let consumer_handle = Consumer::spawn(rx, shutdown_tx, move |n: u32| {
        let seen = Arc::clone(&seen_clone);
        async move {
            if n == 2 {
                return Err(format!("cannot handle {n}"));
            }
            seen.lock().await.push(n);
            Ok(())
        }
    });

    for n in 1..=3 {
        tx.send(n).await.expect("send");
    }

    let exit = consumer_handle.await.expect("join");
    assert_eq!(exit, Err("cannot handle 2".to_string()));
    assert_eq!(*seen.lock().await, vec![1]);
}

#[tokio::test]
async fn test_consumer_stops_on_shutdown() {
    let (_tx, rx) = mpsc::channel::<u32>(16);
    let (shutdown_tx, _) = broadcast::channel(1);

    let consumer_handle =
        Consumer::spawn(rx, shutdown_tx.clone(), |_n: u32| async { Ok::<_, String>(()) });

    let _ = shutdown_tx.send(());

    assert_eq!(consumer_handle.await.expect("join"), Ok(Exit::Shutdown));
}
