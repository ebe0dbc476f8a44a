use std::sync::Arc;

use clap::Parser;
use tracing::info;

/// BizWorx rescheduler daemon — relocates jobs left unfinished the previous
/// day to the next open slot within business hours.
#[derive(Debug, Parser)]
#[command(name = "bizworx-schedulerd", version)]
struct Cli {
    /// Path to bizworx.toml (default: ~/.bizworx/bizworx.toml).
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bizworx=info,bizworx_scheduler=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = bizworx_core::config::BizworxConfig::load(cli.config.as_deref())
        .unwrap_or_else(|e| {
            tracing::warn!("Config load failed ({}), using defaults", e);
            bizworx_core::config::BizworxConfig::default()
        });

    let db_path = &config.database.path;
    ensure_parent_dir(db_path);
    info!(path = %db_path, "opening SQLite database");

    let conn = rusqlite::Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    bizworx_store::db::init_db(&conn)?;
    info!("database migrations complete");

    let store = Arc::new(bizworx_store::JobStore::new(conn));
    let engine = bizworx_scheduler::SchedulerEngine::new(store, config.scheduler.clone());

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let engine_task = tokio::spawn(engine.run(shutdown_rx));

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    let _ = shutdown_tx.send(true);
    engine_task.await?;
    Ok(())
}

/// Ensure the parent directory for a file path exists.
fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}
