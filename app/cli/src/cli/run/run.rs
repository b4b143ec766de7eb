use crate::cli::run::args::Args;
use alloy::transports::http::reqwest::Url;
use chain::rpc::NodeClient;
use engine::{
    context::Context,
    engine::Engine,
    source::{handle::Source, log::LogSource},
};
use eyre::Result;
use std::sync::Arc;
use store::client::Client;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub async fn start(args: &Args) -> Result<()> {
    let node_client = NodeClient::new(Url::parse(&args.rpc_url)?);
    let source: Arc<dyn Source> = Arc::new(LogSource::new(node_client));

    let client = Client::open(&args.db_path).await?;
    let context = Context::new(args.contract_address, source, &client);

    tracing::info!(
        "Indexing contract {} from {} into {}",
        args.contract_address,
        args.rpc_url,
        args.db_path.display()
    );

    // Start read API
    let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
    let (stop_api_tx, stop_api_rx) = oneshot::channel::<()>();
    let api_handle = tokio::spawn(api::server::serve(listener, context.clone(), async move {
        let _ = stop_api_rx.await;
    }));

    // Start engine
    let engine = Engine::start(args.into(), context);

    // Wait for user to request shutdown (SIGINT), or for the engine to fail
    let indexed = engine
        .shutdown_on(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {e}");
            }
        })
        .await;

    tracing::info!("Shutting down read API...");
    let _ = stop_api_tx.send(());
    api_handle.await??;

    indexed?;
    Ok(())
}
