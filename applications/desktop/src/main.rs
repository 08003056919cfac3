//! Cadenza desktop client entry point.
//!
//! Bootstraps config, logging, the database, and the catalog, then hands
//! the assembled [`cadenza_shell::App`] to the line-driven frontend in
//! [`repl`]. Startup failures abort launch with a message.

mod audio;
mod config;
mod repl;

use anyhow::Context;
use cadenza_catalog::{ArchiveCatalog, Catalog, JamendoCatalog, ResultCache};
use cadenza_shell::App;
use config::CatalogChoice;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = config::load().context("failed to load configuration")?;
    info!(catalog = ?cfg.catalog, db = %cfg.database_url, "starting cadenza");

    let pool = cadenza_storage::create_pool(&cfg.database_url)
        .await
        .context("failed to open the database")?;
    cadenza_storage::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;
    cadenza_storage::seed::ensure_defaults(&pool)
        .await
        .context("failed to seed defaults")?;
    if cfg.seed_sample_data {
        cadenza_storage::seed::sample_listeners(&pool)
            .await
            .context("failed to seed sample data")?;
    }

    let cache = Arc::new(ResultCache::new());
    let catalog: Arc<dyn Catalog> = match cfg.catalog {
        CatalogChoice::Archive => Arc::new(ArchiveCatalog::new()?),
        CatalogChoice::Jamendo => {
            Arc::new(JamendoCatalog::new(cfg.jamendo_client_id.clone(), cache)?)
        }
    };

    let opener = audio::HttpStreamOpener::new().context("failed to open an audio device")?;
    let app = App::new(pool, catalog, Box::new(opener));

    repl::run(app).await
}
