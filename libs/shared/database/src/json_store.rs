use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::StoreError;

/// A single JSON document on disk.
///
/// Writes go to a sibling temp file which is then renamed over the target, so
/// readers never observe a half-written document.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    path: PathBuf,
}

impl JsonDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load<T>(&self) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        debug!("Loading document {}", self.path.display());

        let bytes = tokio::fs::read(&self.path).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                StoreError::NotFound { path: self.path.clone() }
            } else {
                error!("Failed to read {}: {}", self.path.display(), source);
                StoreError::Io { path: self.path.clone(), source }
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|source| {
            error!("Invalid JSON in {}: {}", self.path.display(), source);
            StoreError::Malformed { path: self.path.clone(), source }
        })
    }

    /// Like [`load`](Self::load), but a missing document yields `T::default()`.
    pub async fn load_or_default<T>(&self) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        match self.load().await {
            Err(StoreError::NotFound { .. }) => Ok(T::default()),
            other => other,
        }
    }

    pub async fn load_value(&self) -> Result<Value, StoreError> {
        self.load::<Value>().await
    }

    pub async fn save<T>(&self, data: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec_pretty(data).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        let tmp_path = self.temp_path();
        let io_err = |source| StoreError::Io { path: self.path.clone(), source };

        tokio::fs::write(&tmp_path, &bytes).await.map_err(io_err)?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(io_err)?;

        debug!("Saved document {} ({} bytes)", self.path.display(), bytes.len());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
