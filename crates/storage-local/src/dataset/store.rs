use std::path::{Path, PathBuf};
use std::sync::RwLock;

use log::{debug, info};
use tokio::sync::Mutex;

use super::model::Dataset;
use crate::errors::DatasetError;

/// Shared, lock-protected dataset with optional write-back to a JSON file.
///
/// Reads never touch the disk. Updates are serialized and, when the store was
/// opened from a file, the whole dataset is rewritten after each change.
#[derive(Debug)]
pub struct DatasetStore {
    path: Option<PathBuf>,
    data: RwLock<Dataset>,
    writer: Mutex<()>,
}

impl DatasetStore {
    /// Loads the dataset from `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let path = path.into();
        let raw = std::fs::read_to_string(&path)?;
        let dataset: Dataset = serde_json::from_str(&raw)?;
        info!(
            "Loaded dataset {} ({} transactions, {} investments, {} properties, {} users)",
            path.display(),
            dataset.transactions.len(),
            dataset.investments.len(),
            dataset.properties.len(),
            dataset.users.len()
        );
        Ok(Self {
            path: Some(path),
            data: RwLock::new(dataset),
            writer: Mutex::new(()),
        })
    }

    /// Keeps `dataset` in memory only.
    pub fn in_memory(dataset: Dataset) -> Self {
        Self {
            path: None,
            data: RwLock::new(dataset),
            writer: Mutex::new(()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn read<T>(&self, f: impl FnOnce(&Dataset) -> T) -> Result<T, DatasetError> {
        let data = self.data.read().map_err(|_| DatasetError::LockPoisoned)?;
        Ok(f(&data))
    }

    /// Applies `f` to a copy of the dataset and, when it reports a change,
    /// persists the copy before making it visible to readers.
    ///
    /// Returns what `f` returned. On a failed write the in-memory dataset is
    /// left untouched.
    pub async fn update<F>(&self, f: F) -> Result<bool, DatasetError>
    where
        F: FnOnce(&mut Dataset) -> bool + Send,
    {
        let _writer = self.writer.lock().await;
        let mut next = self.read(Dataset::clone)?;
        if !f(&mut next) {
            return Ok(false);
        }
        if let Some(path) = &self.path {
            persist(path, &next).await?;
        }
        *self.data.write().map_err(|_| DatasetError::LockPoisoned)? = next;
        Ok(true)
    }
}

async fn persist(path: &Path, dataset: &Dataset) -> Result<(), DatasetError> {
    let bytes = serde_json::to_vec_pretty(dataset)?;
    let mut staging = path.as_os_str().to_owned();
    staging.push(".part");
    let staging = PathBuf::from(staging);
    tokio::fs::write(&staging, &bytes).await?;
    tokio::fs::rename(&staging, path).await?;
    debug!("Wrote dataset {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
