//! Search with "latest request wins" cancellation.
//!
//! Each new query cancels the token handed to the previous in-flight
//! search, so a stale response can never overwrite a newer one: the
//! superseded call returns `Cancelled` and its caller drops the result.

use cadenza_catalog::{Catalog, CatalogError, SearchOutcome};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Default number of search results requested per kind.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Latest-wins search front for a catalog.
pub struct SearchController {
    catalog: Arc<dyn Catalog>,
    active: Mutex<CancellationToken>,
}

impl SearchController {
    /// Create a controller over a catalog.
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            active: Mutex::new(CancellationToken::new()),
        }
    }

    /// Run a search, cancelling any in-flight one first.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<SearchOutcome, CatalogError> {
        let token = self.supersede();
        self.catalog.search(query, limit, token).await
    }

    /// Cancel whatever is in flight without starting a new search (the
    /// user cleared the box or left the page).
    pub fn cancel(&self) {
        self.supersede();
    }

    fn supersede(&self) -> CancellationToken {
        let mut active = self.active.lock().expect("search token lock poisoned");
        active.cancel();
        *active = CancellationToken::new();
        active.clone()
    }
}
