use anyhow::Context;
use funnel_renderer::RenderOptions;
use funnel_store::{FileFunnelStore, FunnelStore, HttpFunnelStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_CONFIG_NAME: &str = "funnel.config.json";

/// Funnel configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one JSON file per funnel
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// HTML output options
    #[serde(default)]
    pub render: RenderOptions,

    /// Remote funnel API; replaces the store directory when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

fn default_store_dir() -> String {
    "funnels".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3030
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the store directory
    pub fn get_store_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.store_dir)
    }

    pub fn addr(&self, port: Option<u16>) -> String {
        format!("{}:{}", self.host, port.unwrap_or(self.port))
    }

    /// Backend selected by this config
    pub async fn open_store(&self, cwd: &str) -> anyhow::Result<Arc<dyn FunnelStore>> {
        match &self.api_url {
            Some(url) => {
                tracing::debug!(url = %url, "Using remote funnel store");
                Ok(Arc::new(HttpFunnelStore::new(url.clone())))
            }
            None => {
                let dir = self.get_store_dir(cwd);
                let store = FileFunnelStore::open(&dir)
                    .await
                    .with_context(|| format!("Cannot open store directory {}", dir.display()))?;
                Ok(Arc::new(store))
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            host: default_host(),
            port: default_port(),
            render: RenderOptions::default(),
            api_url: None,
        }
    }
}
