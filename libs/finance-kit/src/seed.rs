//! Idempotent loading of reference data from JSON files.
//!
//! A seed file is a JSON array of items. Each item is inserted only if the
//! target store does not already contain it, so running the same seed twice
//! leaves the store unchanged.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Store that seed items are loaded into.
#[async_trait]
pub trait SeedStore<T: Send + Sync>: Send + Sync {
    /// Whether an item with the same identity is already stored.
    async fn contains(&self, item: &T) -> anyhow::Result<bool>;

    /// Stores `item`. Returns `false` if the store already held the same
    /// identity, which can happen when the store normalizes the item first.
    async fn insert(&self, item: T) -> anyhow::Result<bool>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed seed data in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to store seed item from {origin}: {source}")]
    Store {
        origin: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Loads the JSON array in `json` into `store`.
///
/// `origin` names the source in logs and errors.
///
/// # Errors
/// Returns `SeedError::Parse` if `json` is not an array of `T`, and
/// `SeedError::Store` if the store fails. Items inserted before a store
/// failure stay inserted.
pub async fn seed_from_slice<T, S>(
    store: &S,
    origin: &str,
    json: &[u8],
) -> Result<SeedReport, SeedError>
where
    T: DeserializeOwned + Send + Sync,
    S: SeedStore<T> + ?Sized,
{
    let items: Vec<T> = serde_json::from_slice(json).map_err(|source| SeedError::Parse {
        origin: origin.to_owned(),
        source,
    })?;

    let store_err = |source| SeedError::Store {
        origin: origin.to_owned(),
        source,
    };

    let mut report = SeedReport::default();
    for item in items {
        if store.contains(&item).await.map_err(store_err)? {
            report.skipped += 1;
            continue;
        }
        if store.insert(item).await.map_err(store_err)? {
            report.inserted += 1;
        } else {
            report.skipped += 1;
        }
    }

    tracing::info!(
        origin,
        inserted = report.inserted,
        skipped = report.skipped,
        "Seed data applied"
    );
    Ok(report)
}

/// Reads `path` and loads it with [`seed_from_slice`].
///
/// # Errors
/// Returns `SeedError::Io` if the file cannot be read, otherwise the errors of
/// [`seed_from_slice`].
pub async fn seed_from_file<T, S>(store: &S, path: &Path) -> Result<SeedReport, SeedError>
where
    T: DeserializeOwned + Send + Sync,
    S: SeedStore<T> + ?Sized,
{
    let bytes = tokio::fs::read(path).await.map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    seed_from_slice::<T, S>(store, &path.display().to_string(), &bytes).await
}
