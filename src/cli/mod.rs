use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::LedgerService;
use crate::http;

/// Walletd - Account Ledger API
#[derive(Parser)]
#[command(name = "walletd")]
#[command(about = "A minimal account-ledger HTTP API")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "walletd.db")]
    pub database: String,

    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    pub listen: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        self.init_tracing();

        let service = LedgerService::init(&self.database)
            .await
            .with_context(|| format!("Failed to open database {}", self.database))?;

        let app = http::router(Arc::new(service));

        let listener = tokio::net::TcpListener::bind(&self.listen)
            .await
            .with_context(|| format!("Failed to bind {}", self.listen))?;

        tracing::info!("listening on {}", listener.local_addr()?);

        axum::serve(listener, app).await?;
        Ok(())
    }

    fn init_tracing(&self) {
        let default = if self.verbose { "debug" } else { "info" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
