//! Local JSON snapshots of list collections.

use crate::anilist::data::ListCollectionResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_SNAPSHOT_FILE: &str = "response.json";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Could not access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub fn load_json_file<T>(path: &Path) -> Result<T, SnapshotError>
where
    T: DeserializeOwned,
{
    let contents = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| SnapshotError::Json {
        path: path.display().to_string(),
        source,
    })
}

pub fn save_json_file<T>(path: &Path, value: &T) -> Result<(), SnapshotError>
where
    T: Serialize,
{
    let contents = serde_json::to_string_pretty(value).map_err(|source| SnapshotError::Json {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, contents).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("Wrote snapshot to {}", path.display());
    Ok(())
}

pub fn load_collection(path: &Path) -> Result<ListCollectionResponse, SnapshotError> {
    let response: ListCollectionResponse = load_json_file(path)?;
    log::debug!(
        "Loaded {} list entries from {}",
        response.collection().entries().count(),
        path.display()
    );
    Ok(response)
}
