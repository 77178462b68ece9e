use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub storage: StorageConfig,
}

/// Listing fetch configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Page number is appended to this as-is.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Snapshot storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_base_url() -> String {
    "https://finance.naver.com/sise/entryJongmok.nhn?&page=".to_string()
}
fn default_user_agent() -> String {
    // The listing endpoint serves a stripped page to unknown clients.
    "Mozilla/5.0".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("SISE").separator("__"))
            .build()?;

        let app_cfg: AppConfig = cfg.try_deserialize().unwrap_or_else(|_| AppConfig::default());
        Ok(app_cfg)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig {
                base_url: default_base_url(),
                user_agent: default_user_agent(),
                timeout_secs: default_timeout_secs(),
            },
            storage: StorageConfig {
                data_dir: default_data_dir(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_listing_endpoint() {
        let cfg = AppConfig::default();
        assert!(cfg.fetch.base_url.ends_with("page="));
        assert_eq!(cfg.fetch.user_agent, "Mozilla/5.0");
        assert_eq!(cfg.fetch.timeout_secs, 30);
        assert_eq!(cfg.storage.data_dir, PathBuf::from("data"));
    }
}
