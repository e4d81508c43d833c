//! Annotated spreadsheet artifacts
//!
//! Every analysis writes its own `<uuid>.csv`; the store remembers the most
//! recent handle so "download latest" works without a shared output slot.

use crate::error::{AnalysisError, Result};
use crate::types::Dataset;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

pub const SENTIMENT_COLUMN: &str = "Sentiment";
pub const SCORE_COLUMN: &str = "Score";
pub const SUBJECTIVITY_COLUMN: &str = "Subjectivity";

const EXTENSION: &str = "csv";

/// Request-scoped reference to a written artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHandle {
    pub id: Uuid,
    pub path: PathBuf,
}

/// Directory of annotated spreadsheets
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    latest: Arc<RwLock<Option<ArtifactHandle>>>,
}

impl ArtifactStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            latest: Arc::new(RwLock::new(None)),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the annotated dataset under a fresh id
    pub fn write(&self, dataset: &Dataset) -> Result<ArtifactHandle> {
        std::fs::create_dir_all(&self.dir)?;

        let id = Uuid::new_v4();
        let path = self.path_for(&id);
        let file = File::create(&path)?;
        write_dataset(dataset, file)?;

        let handle = ArtifactHandle { id, path };
        *self.latest.write() = Some(handle.clone());
        info!("Wrote {} annotated rows to {}", dataset.len(), handle.path.display());
        Ok(handle)
    }

    /// Look up an artifact by id
    pub fn get(&self, id: &Uuid) -> Result<ArtifactHandle> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Err(AnalysisError::ArtifactNotFound(path.display().to_string()));
        }
        Ok(ArtifactHandle { id: *id, path })
    }

    /// Most recent artifact: the last one this store wrote, else the newest
    /// file in the directory
    pub fn latest(&self) -> Result<ArtifactHandle> {
        if let Some(handle) = self.latest.read().clone() {
            if handle.path.is_file() {
                return Ok(handle);
            }
        }

        self.newest_on_disk()?
            .ok_or_else(|| AnalysisError::ArtifactNotFound(self.dir.display().to_string()))
    }

    /// Stream an artifact's bytes into `out`
    pub fn copy_to<W: Write>(&self, handle: &ArtifactHandle, out: &mut W) -> Result<u64> {
        let mut file = File::open(&handle.path)?;
        let bytes = io::copy(&mut file, out)?;
        debug!("Streamed {} bytes from {}", bytes, handle.path.display());
        Ok(bytes)
    }

    fn path_for(&self, id: &Uuid) -> PathBuf {
        self.dir.join(format!("{}.{}", id, EXTENSION))
    }

    fn newest_on_disk(&self) -> Result<Option<ArtifactHandle>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut newest: Option<(std::time::SystemTime, ArtifactHandle)> = None;
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| Uuid::parse_str(s).ok())
            else {
                continue;
            };

            let modified = entry.metadata()?.modified()?;
            if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
                newest = Some((modified, ArtifactHandle { id, path }));
            }
        }

        Ok(newest.map(|(_, handle)| handle))
    }
}

/// Write original columns plus the three sentiment columns.
///
/// A sentiment column that already exists in the input is overwritten in place.
pub fn write_dataset<W: Write>(dataset: &Dataset, out: W) -> Result<()> {
    let mut headers = dataset.headers.clone();
    let mut slot = |name: &str| -> usize {
        headers.iter().position(|h| h == name).unwrap_or_else(|| {
            headers.push(name.to_string());
            headers.len() - 1
        })
    };
    let sentiment_idx = slot(SENTIMENT_COLUMN);
    let score_idx = slot(SCORE_COLUMN);
    let subjectivity_idx = slot(SUBJECTIVITY_COLUMN);

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&headers)?;

    for record in &dataset.records {
        let mut row: Vec<String> = record
            .record
            .original
            .iter()
            .take(dataset.headers.len())
            .map(|cell| cell.clone().unwrap_or_default())
            .collect();
        row.resize(headers.len(), String::new());
        row[sentiment_idx] = record.category.to_string();
        row[score_idx] = record.polarity.to_string();
        row[subjectivity_idx] = record.subjectivity.to_string();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
