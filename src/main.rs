use anyhow::{Context, Result};
use axum::{Router, extract::FromRef};
use std::{net::SocketAddr, path::Path, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{config::Settings, repository::InMemoryRepository, searcher::SearchEngine};

// Declare modules
mod config;
mod error;
mod models;
mod repository;
mod routes;
mod searcher;

// Shared application state, cloned into every handler
#[derive(Clone, FromRef)]
struct AppState {
    settings: Arc<Settings>,
    engine: SearchEngine,
}

// Builds the in-memory catalog from the configured file.
// A configured but missing file is not fatal: the service starts with an empty catalog.
fn load_catalog(settings: &Settings) -> Result<InMemoryRepository> {
    let Some(path) = settings.catalog_path.as_deref().filter(|p| !p.is_empty()) else {
        tracing::warn!("No catalog_path configured, starting with an empty catalog.");
        return Ok(InMemoryRepository::empty());
    };

    if !Path::new(path).exists() {
        tracing::warn!("Catalog file '{}' not found, starting with an empty catalog.", path);
        return Ok(InMemoryRepository::empty());
    }

    InMemoryRepository::load(path)
        .with_context(|| format!("Failed to load catalog from '{}'", path))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "car_searcher=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing car searcher server...");

    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };
    let shared_settings = Arc::new(settings);

    let repository = load_catalog(&shared_settings)?;
    tracing::info!("Catalog ready with {} listings.", repository.len());

    let app_state = AppState {
        settings: shared_settings.clone(),
        engine: SearchEngine::new(Arc::new(repository)),
    };

    let app: Router = routes::create_router(app_state);

    let addr: SocketAddr = shared_settings
        .server_address
        .parse()
        .with_context(|| {
            format!("Invalid server address format: {}", shared_settings.server_address)
        })?;

    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searcher::{FilterSpec, PageRequest, SortOrder};

    #[test]
    fn missing_catalog_file_yields_empty_catalog() {
        let settings = Settings {
            catalog_path: Some("does/not/exist.csv".to_string()),
            ..Settings::default()
        };
        assert_eq!(load_catalog(&settings).unwrap().len(), 0);

        let settings = Settings::default();
        assert_eq!(load_catalog(&settings).unwrap().len(), 0);
    }

    #[test]
    fn bundled_catalog_loads_and_searches() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/listings.csv");
        let settings = Settings {
            catalog_path: Some(path.to_string()),
            ..Settings::default()
        };
        let repository = load_catalog(&settings).unwrap();
        assert!(repository.len() > 0);

        let engine = SearchEngine::new(Arc::new(repository));
        let page = engine.search(
            &FilterSpec::default(),
            &SortOrder::unsorted(),
            PageRequest::default(),
        );
        assert_eq!(page.number_of_elements(), 5);
    }
}
