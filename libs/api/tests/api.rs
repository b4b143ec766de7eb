#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, B256, U256};
    use alloy::rpc::types::Log;
    use alloy::sol_types::SolEvent;
    use alloy::transports::http::reqwest;
    use api::server;
    use chain::abi;
    use engine::args::Args;
    use engine::context::Context;
    use engine::engine::Engine;
    use engine::source::handle::Source;
    use engine::source::memory::MemorySource;
    use eyre::Result;
    use serde_json::Value;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use store::client::Client;
    use tokio::sync::oneshot;

    const CONTRACT: Address = Address::repeat_byte(0x5F);
    const DOCTOR: Address = Address::repeat_byte(0xAA);
    const MANUFACTURER: Address = Address::repeat_byte(0xCC);

    struct TestServer {
        address: SocketAddr,
        http: reqwest::Client,
        stop_tx: oneshot::Sender<()>,
        handle: tokio::task::JoinHandle<std::io::Result<()>>,
    }

    impl TestServer {
        async fn start(context: Context) -> Result<Self> {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
            let address = listener.local_addr()?;
            let (stop_tx, stop_rx) = oneshot::channel::<()>();
            let handle = tokio::spawn(server::serve(listener, context, async move {
                let _ = stop_rx.await;
            }));
            Ok(Self { address, http: reqwest::Client::new(), stop_tx, handle })
        }

        async fn get(&self, path: &str) -> Result<(u16, Value)> {
            let response = self.http.get(format!("http://{}{path}", self.address)).send().await?;
            let status = response.status().as_u16();
            let body = serde_json::from_str(&response.text().await?)?;
            Ok((status, body))
        }

        async fn stop(self) -> Result<()> {
            let Self { http, stop_tx, handle, .. } = self;
            // Close idle keep-alive connections so graceful shutdown can finish
            drop(http);
            let _ = stop_tx.send(());
            handle.await??;
            Ok(())
        }
    }

    fn log_at<E: SolEvent>(block_number: u64, log_index: u64, event: &E) -> Log {
        Log {
            inner: alloy::primitives::Log { address: CONTRACT, data: event.encode_log_data() },
            block_number: Some(block_number),
            log_index: Some(log_index),
            transaction_hash: Some(B256::with_last_byte(block_number as u8)),
            ..Default::default()
        }
    }

    fn prescription_created(id: u64, timestamp: u64) -> abi::PrescriptionCreated {
        abi::PrescriptionCreated {
            id: U256::from(id),
            doctor: DOCTOR,
            patientHash: format!("patient-{id}"),
            expiresAt: U256::from(timestamp + 1_000),
            timestamp: U256::from(timestamp),
        }
    }

    /// Backfills `logs` up to `head` and returns the shared context.
    async fn indexed(logs: Vec<Log>, head: u64) -> Result<Context> {
        let client = Client::init("sqlite::memory:").await?;
        let source = Arc::new(MemorySource::new());
        for log in logs {
            source.push_log(log);
        }
        source.set_head(head);

        let context = Context::new(CONTRACT, Arc::clone(&source) as Arc<dyn Source>, &client);
        let engine = Engine::start(Args::default(), context.clone());
        for _ in 0..500 {
            if context.checkpoints.get_last_checkpoint().await?.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        engine.shutdown().await?;

        Ok(context)
    }

    #[tokio::test]
    async fn test_backfilled_prescription_is_served() -> Result<()> {
        let context = indexed(vec![log_at(5, 0, &prescription_created(1, 1_700))], 5).await?;
        let server = TestServer::start(context).await?;

        let (status, prescription) = server.get("/api/prescriptions/1").await?;
        assert_eq!(status, 200);
        assert_eq!(prescription["id"], 1);
        assert_eq!(prescription["patient_hash"], "patient-1");
        assert_eq!(prescription["doctor"], DOCTOR.to_checksum(None));
        assert_eq!(prescription["created_at"], 1_700);
        assert_eq!(prescription["version"], 1);
        assert!(prescription["dispensed_at"].is_null());

        let raw_event = prescription["raw_event"].as_str().unwrap_or("{}");
        let raw_event: Value = serde_json::from_str(raw_event)?;
        assert_eq!(raw_event["event"], "PrescriptionCreated");
        assert_eq!(raw_event["blockNumber"], 5);

        let (status, health) = server.get("/api/health").await?;
        assert_eq!(status, 200);
        assert_eq!(health["ok"], true);
        assert_eq!(health["lastBlock"], 5);
        assert_eq!(health["contract"], CONTRACT.to_checksum(None));

        server.stop().await
    }

    #[tokio::test]
    async fn test_recalled_batch_is_listed() -> Result<()> {
        let created = abi::BatchCreated {
            id: U256::from(7),
            batchNumber: "B-007".to_string(),
            medicineName: "Amoxicillin".to_string(),
            manufacturer: MANUFACTURER,
            timestamp: U256::from(100),
        };
        let recalled = abi::BatchRecalled {
            id: U256::from(7),
            recalledBy: MANUFACTURER,
            reason: "contamination".to_string(),
            timestamp: U256::from(200),
        };
        let context = indexed(vec![log_at(3, 0, &created), log_at(4, 0, &recalled)], 4).await?;
        let server = TestServer::start(context).await?;

        let (status, batches) = server.get("/api/batches").await?;
        assert_eq!(status, 200);
        let batches = batches.as_array().cloned().unwrap_or_default();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0]["id"], 7);
        assert_eq!(batches[0]["recall_reason"], "contamination");
        assert_eq!(batches[0]["recalled_at"], 200);
        assert_eq!(batches[0]["recalled_by"], MANUFACTURER.to_checksum(None));

        let (status, batch) = server.get("/api/batches/7").await?;
        assert_eq!(status, 200);
        assert_eq!(batch["batch_number"], "B-007");

        server.stop().await
    }

    #[tokio::test]
    async fn test_prescription_list_filters_and_limits() -> Result<()> {
        let logs = (1..=600).map(|id| log_at(id, 0, &prescription_created(id, id))).collect();
        let context = indexed(logs, 600).await?;
        let server = TestServer::start(context).await?;

        let count = |body: &Value| body.as_array().map_or(0, Vec::len);

        let (_, rows) = server.get("/api/prescriptions?limit=10000").await?;
        assert_eq!(count(&rows), 500);

        let (_, rows) = server.get("/api/prescriptions").await?;
        assert_eq!(count(&rows), 100);
        assert_eq!(rows[0]["id"], 600);

        let (_, rows) = server.get("/api/prescriptions?limit=abc").await?;
        assert_eq!(count(&rows), 100);

        let (_, rows) = server.get("/api/prescriptions?limit=2").await?;
        assert_eq!(count(&rows), 2);

        let (_, rows) = server.get("/api/prescriptions?patientHash=patient-42").await?;
        assert_eq!(count(&rows), 1);
        assert_eq!(rows[0]["id"], 42);

        let doctor = DOCTOR.to_checksum(None).to_lowercase();
        let (_, rows) = server.get(&format!("/api/prescriptions?doctor={doctor}&limit=3")).await?;
        assert_eq!(count(&rows), 3);

        let (_, rows) = server.get(&format!("/api/prescriptions?doctor={CONTRACT}")).await?;
        assert_eq!(count(&rows), 0);

        server.stop().await
    }

    #[tokio::test]
    async fn test_missing_rows_are_not_found() -> Result<()> {
        let context = indexed(vec![], 0).await?;
        let server = TestServer::start(context).await?;

        for path in ["/api/prescriptions/1", "/api/batches/1", "/api/prescriptions/abc"] {
            let (status, body) = server.get(path).await?;
            assert_eq!(status, 404, "{path}");
            assert_eq!(body["error"], "Not found");
        }

        let (_, health) = server.get("/api/health").await?;
        assert_eq!(health["lastBlock"], 0);

        server.stop().await
    }
}
