//! File-backed storage for the single current portfolio document.
//!
//! The file holds `{"parsedResumeData": <document>}`. Each write lands in its
//! own temp file under `.staging/` and is renamed into place, so a reader never
//! sees a half-written document and concurrent saves never share a temp path.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::models::portfolio::PortfolioDocument;

pub const STORAGE_KEY: &str = "parsedResumeData";
const STORE_FILE: &str = "parsedResumeData.json";
const STAGING_DIR: &str = ".staging";

#[derive(Debug, Clone)]
pub struct PortfolioStore {
    path: PathBuf,
    staging: PathBuf,
}

impl PortfolioStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            path: data_dir.join(STORE_FILE),
            staging: data_dir.join(STAGING_DIR),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored document, or `None` when nothing usable is stored.
    ///
    /// An unreadable payload is logged and treated as absent; the next save
    /// replaces it.
    pub async fn load(&self) -> Result<Option<PortfolioDocument>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };

        let document = serde_json::from_str::<Value>(&raw)
            .ok()
            .and_then(|mut value| value.get_mut(STORAGE_KEY).map(Value::take))
            .filter(|value| !value.is_null())
            .map(|value| PortfolioDocument::deserialize(&value));

        match document {
            Some(Ok(document)) => Ok(Some(document)),
            Some(Err(e)) => {
                warn!("Ignoring unreadable stored portfolio at {}: {e}", self.path.display());
                Ok(None)
            }
            None => {
                warn!("Ignoring stored portfolio at {} without a {STORAGE_KEY} key", self.path.display());
                Ok(None)
            }
        }
    }

    pub async fn save(&self, document: &PortfolioDocument) -> Result<()> {
        let payload = serde_json::to_vec_pretty(&json!({ STORAGE_KEY: document }))
            .context("Failed to serialize portfolio")?;

        let staging = self.staging.clone();
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_replacing(&staging, &path, &payload))
            .await
            .context("Portfolio save task panicked")??;

        info!("Portfolio saved to {}", self.path.display());
        Ok(())
    }

    /// Removes the stored document. Clearing an empty store is a no-op.
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Portfolio cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}

fn write_replacing(staging: &Path, path: &Path, payload: &[u8]) -> Result<()> {
    std::fs::create_dir_all(staging)
        .with_context(|| format!("Failed to create directory: {}", staging.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(staging)
        .with_context(|| format!("Failed to create temp file in {}", staging.display()))?;
    tmp.write_all(payload)
        .with_context(|| format!("Failed to write {}", tmp.path().display()))?;
    tmp.persist(path)
        .with_context(|| format!("Failed to move portfolio into {}", path.display()))?;
    Ok(())
}
