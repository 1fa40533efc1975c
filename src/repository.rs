// Listing storage. The search engine only ever sees a read-only snapshot.

use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path, sync::Arc};

use crate::models::Listing;

/// Source of the listing collection.
///
/// Implementations must hand out a snapshot that stays stable for the duration
/// of one search, since filtering, sorting and slicing all run over it.
pub trait ListingRepository: Send + Sync {
    fn snapshot(&self) -> Arc<[Listing]>;
}

// Whole catalog held in memory, shared between requests
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    listings: Arc<[Listing]>,
}

impl InMemoryRepository {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings: listings.into() }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Loads a catalog file. The format is picked from the extension:
    /// `.csv` (with a header row) or `.json` (an array of listings).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let listings = match extension.as_deref() {
            Some("csv") => read_csv(path)?,
            Some("json") => read_json(path)?,
            _ => {
                return Err(anyhow!(
                    "Unsupported catalog format for '{}' (expected .csv or .json)",
                    path.display()
                ));
            }
        };

        tracing::info!("Loaded {} listings from {}", listings.len(), path.display());
        Ok(Self::new(listings))
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }
}

impl ListingRepository for InMemoryRepository {
    fn snapshot(&self) -> Arc<[Listing]> {
        Arc::clone(&self.listings)
    }
}

fn read_csv(path: &Path) -> Result<Vec<Listing>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open catalog file {}", path.display()))?;

    let mut listings = Vec::new();
    for (row, record) in reader.deserialize::<Listing>().enumerate() {
        // Row numbers are 1-based and skip the header
        let listing = record.with_context(|| {
            format!("Invalid listing on row {} of {}", row + 2, path.display())
        })?;
        listings.push(listing);
    }
    Ok(listings)
}

fn read_json(path: &Path) -> Result<Vec<Listing>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog file {}", path.display()))
}
