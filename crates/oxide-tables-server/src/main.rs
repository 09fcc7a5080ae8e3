//! oxide-tables server binary.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use oxide_tables_server::{build_router, serve, shutdown_signal, AppState, Cli};
use oxide_tables_sqlite::TableStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level())
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = TableStore::connect(&cli.database, cli.max_connections).await?;
    let router = Arc::new(build_router(&AppState::new(
        store.clone(),
        cli.raw_sql_capability(),
    )));

    let listener = TcpListener::bind(cli.bind).await?;
    info!(
        addr = %cli.bind,
        raw_sql = !cli.disable_raw_sql,
        "oxide-tables listening"
    );

    serve(listener, router, shutdown_signal()).await;

    store.close().await;
    info!("Shutdown complete");
    Ok(())
}
