// Configuration loading
// Uses the 'config' crate: defaults, then config.toml, then APP_* environment variables

use anyhow::Result;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

use crate::searcher::paginator::DEFAULT_PAGE_SIZE;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server_address: String,
    // Catalog file loaded at startup (.csv or .json); absent means an empty catalog
    pub catalog_path: Option<String>,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Self::defaults()?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name("config").required(false))
            // Load from environment variables (e.g., APP_CATALOG_PATH)
            .add_source(Environment::with_prefix("APP").try_parsing(true));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("catalog_path", "data/listings.csv")?
            .set_default("default_page_size", DEFAULT_PAGE_SIZE as u64)?
            .set_default("max_page_size", 2000u64)?)
    }

    fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            anyhow::bail!("Page sizes must be greater than zero");
        }
        if self.default_page_size > self.max_page_size {
            anyhow::bail!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size,
                self.max_page_size
            );
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1:3000".to_string(),
            catalog_path: None,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: 2000,
        }
    }
}
