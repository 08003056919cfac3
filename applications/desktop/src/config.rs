//! Desktop client configuration.
//!
//! Read from `cadenza.toml` next to the working directory, with
//! `CADENZA_*` environment variables overriding file values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default)]
    pub catalog: CatalogChoice,

    /// Client id for the Jamendo catalog; only used with `catalog = "jamendo"`.
    #[serde(default = "default_client_id")]
    pub jamendo_client_id: String,

    /// Populate sample listener accounts on first start.
    #[serde(default)]
    pub seed_sample_data: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogChoice {
    #[default]
    Archive,
    Jamendo,
}

fn default_database_url() -> String {
    "sqlite://cadenza.db".to_string()
}

fn default_client_id() -> String {
    // Jamendo's public demo client id; replace with your own in cadenza.toml.
    "99575e94".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            catalog: CatalogChoice::default(),
            jamendo_client_id: default_client_id(),
            seed_sample_data: false,
        }
    }
}

pub fn load() -> Result<AppConfig, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name("cadenza").required(false))
        .add_source(config::Environment::with_prefix("CADENZA"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_archive_catalog() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.catalog, CatalogChoice::Archive);
        assert_eq!(cfg.database_url, "sqlite://cadenza.db");
        assert!(!cfg.seed_sample_data);
    }
}
