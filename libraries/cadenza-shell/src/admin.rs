//! Admin controllers: ban list, statistics, report.

use cadenza_catalog::{Catalog, CatalogStatistics};
use cadenza_core::{Listener, Result};
use cadenza_storage::listeners;
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// The statistics page data: local store counters joined with the
/// catalog-wide fan-out.
#[derive(Debug, Clone)]
pub struct StatisticsView {
    /// Registered listener accounts
    pub total_listeners: i64,
    /// Playlists across all listeners
    pub total_playlists: i64,
    /// External catalog statistics
    pub catalog: CatalogStatistics,
}

/// The report page data.
#[derive(Debug, Clone)]
pub struct ReportView {
    /// Registrations grouped by `YYYY-MM`, newest first
    pub registrations_per_month: Vec<(String, i64)>,
    /// Currently banned accounts
    pub banned_accounts: i64,
    /// Registered listener accounts
    pub total_listeners: i64,
}

/// Admin page operations.
pub struct AdminController {
    catalog: Arc<dyn Catalog>,
    stats_token: Mutex<CancellationToken>,
}

impl AdminController {
    /// Create a controller over a catalog.
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            stats_token: Mutex::new(CancellationToken::new()),
        }
    }

    /// Listeners for the ban list; a blank filter returns everyone.
    pub async fn ban_list(&self, pool: &SqlitePool, name_filter: &str) -> Result<Vec<Listener>> {
        Ok(listeners::search_by_name(pool, name_filter).await?)
    }

    /// Flip a listener's ban flag, returning the new status.
    pub async fn toggle_ban(&self, pool: &SqlitePool, listener_id: i64) -> Result<bool> {
        let banned = listeners::toggle_ban(pool, listener_id).await?;
        info!(listener = listener_id, banned, "ban flag toggled");
        Ok(banned)
    }

    /// Load the statistics page. Re-requesting cancels the previous
    /// in-flight catalog fan-out (latest request wins).
    pub async fn statistics(&self, pool: &SqlitePool) -> Result<StatisticsView> {
        let token = {
            let mut active = self.stats_token.lock().expect("stats token lock poisoned");
            active.cancel();
            *active = CancellationToken::new();
            active.clone()
        };

        let total_listeners = listeners::count(pool).await?;
        let total_playlists = cadenza_storage::playlists::count(pool).await?;
        let catalog = self.catalog.statistics(token).await?;

        Ok(StatisticsView {
            total_listeners,
            total_playlists,
            catalog,
        })
    }

    /// Load the registrations report.
    pub async fn report(&self, pool: &SqlitePool) -> Result<ReportView> {
        Ok(ReportView {
            registrations_per_month: listeners::registrations_per_month(pool).await?,
            banned_accounts: listeners::banned_count(pool).await?,
            total_listeners: listeners::count(pool).await?,
        })
    }
}
