mod cli {
    pub mod run {
        pub mod args;
        pub mod run;
    }
    pub mod query {
        pub mod args;
        pub mod read;
        pub mod run;
    }
    pub mod cmd;
    pub mod read;
}

use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::cmd::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli);

    match &cli.command {
        Command::Run(args) => {
            tracing::info!("Run Command: {:?}", args);
            cli::run::run::start(args).await
        }
        Command::Select(query) => {
            tracing::info!("Select Command: {:?}", query);
            cli::query::run::select(query).await
        }
    }
}

fn init_tracing(cli: &Cli) {
    // RUST_LOG wins, otherwise info
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match &cli.command {
        Command::Run(_) => {
            tracing_subscriber::fmt().with_env_filter(env_filter).init();
        }
        Command::Select(_) => {
            // keep stdout clean for the JSON output
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
