//! Checkpoint persistence for interrupted batch runs.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MilonError, Result};

/// Checkpoint written alongside the dataset during a batch run.
///
/// `items_processed` counts items of the *selected slice*, so a resumed
/// run can skip exactly the work already done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingProgress {
    /// The category selector the run was started with.
    pub dataset_selector: String,
    pub items_processed: usize,
    pub items_total: usize,
    pub timestamp: DateTime<Utc>,
}

impl ProcessingProgress {
    pub fn new(dataset_selector: impl Into<String>, items_processed: usize, items_total: usize) -> Self {
        Self {
            dataset_selector: dataset_selector.into(),
            items_processed,
            items_total,
            timestamp: Utc::now(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.items_processed >= self.items_total
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| MilonError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| MilonError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

/// Sidecar checkpoint path for a dataset: `words.json` -> `words.progress.json`.
pub fn progress_path(dataset: impl AsRef<Path>) -> PathBuf {
    sidecar_path(dataset.as_ref(), "progress")
}

/// Sidecar verification-report path: `words.json` -> `words.report.json`.
pub fn report_path(dataset: impl AsRef<Path>) -> PathBuf {
    sidecar_path(dataset.as_ref(), "report")
}

fn sidecar_path(dataset: &Path, tag: &str) -> PathBuf {
    let stem = dataset
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");
    dataset.with_file_name(format!("{}.{}.json", stem, tag))
}
