//! Local snapshot storage
//!
//! Raw chain snapshots are dropped into `raw_dir` by the acquisition stage as
//! `<date>_<SYMBOL>.json`. Processed documents are written to `processed_dir`
//! under the same naming scheme.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{GexError, GexResult};

use super::snapshot::{processed_file_name, ProcessedSnapshot};

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding raw provider snapshots
    pub raw_dir: PathBuf,
    /// Directory receiving processed documents
    pub processed_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("./data/raw"),
            processed_dir: PathBuf::from("./data/processed"),
        }
    }
}

/// Snapshot store manager
pub struct SnapshotStore {
    config: StoreConfig,
}

impl SnapshotStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Most recently modified raw snapshot for `symbol`
    ///
    /// Ties on modification time go to the lexically greatest file name.
    pub fn latest_raw(&self, symbol: &str) -> GexResult<PathBuf> {
        let dir = &self.config.raw_dir;
        if !dir.is_dir() {
            return Err(GexError::data(format!(
                "raw data directory {} not found",
                dir.display()
            )));
        }

        let suffix = format!("_{}.json", symbol);
        let mut latest: Option<(SystemTime, PathBuf)> = None;

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if !file_name.ends_with(&suffix) || !entry.file_type()?.is_file() {
                continue;
            }

            let modified = entry.metadata()?.modified()?;
            let path = entry.path();
            let newer = match &latest {
                None => true,
                Some((t, p)) => (modified, &path) > (*t, p),
            };
            if newer {
                latest = Some((modified, path));
            }
        }

        latest
            .map(|(_, path)| path)
            .ok_or_else(|| GexError::data(format!("no raw snapshot found for {}", symbol)))
    }

    /// Read a raw snapshot document
    pub fn load_raw(path: &Path) -> GexResult<Value> {
        let json = fs::read_to_string(path)?;
        let raw: Value = serde_json::from_str(&json)?;
        Ok(raw)
    }

    /// Locate and read the latest raw snapshot for `symbol`
    pub fn load_latest_raw(&self, symbol: &str) -> GexResult<(PathBuf, Value)> {
        let path = self.latest_raw(symbol)?;
        tracing::info!("Loading raw snapshot from {:?}", path);
        let raw = Self::load_raw(&path)?;
        Ok((path, raw))
    }

    /// Write a processed snapshot, creating the directory if needed
    pub fn save_processed(&self, snapshot: &ProcessedSnapshot) -> GexResult<PathBuf> {
        fs::create_dir_all(&self.config.processed_dir)?;

        let path = self.config.processed_dir.join(snapshot.file_name());
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, json)?;

        tracing::info!("Saved processed snapshot for {} at {:?}", snapshot.symbol, path);
        Ok(path)
    }

    /// Load the processed snapshot for `symbol` on `date`, if present
    pub fn load_processed(
        &self,
        date: NaiveDate,
        symbol: &str,
    ) -> GexResult<Option<ProcessedSnapshot>> {
        let path = self
            .config
            .processed_dir
            .join(processed_file_name(date, symbol));
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let snapshot: ProcessedSnapshot = serde_json::from_str(&json)?;
        Ok(Some(snapshot))
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
