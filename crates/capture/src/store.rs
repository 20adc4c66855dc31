use crate::validate::is_email_shaped;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Fixed key the record list is stored under.
pub const STORAGE_KEY: &str = "backdrop_notify";

const STORE_FILE: &str = "capture.json";

/// Errors from capture operations. Only validation errors reach callers of
/// `submit`; backing-file failures are logged and swallowed.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not an email address: {0:?}")]
    InvalidEmail(String),
}

/// One accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub email: String,
    /// Unix timestamp in milliseconds at acceptance.
    pub ts: u64,
}

/// Append-only capture store backed by a JSON file.
///
/// The file holds a map keyed by [`STORAGE_KEY`] so unrelated lists could
/// share it. A missing or unreadable file starts an empty list rather than
/// failing; the backup is best-effort.
pub struct CaptureStore {
    path: PathBuf,
    records: Vec<CaptureRecord>,
}

impl CaptureStore {
    /// Open a store in the given directory, loading any existing records.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(STORE_FILE);
        let records = Self::load_records(&path);
        Ok(Self { path, records })
    }

    fn load_records(path: &Path) -> Vec<CaptureRecord> {
        let Ok(text) = std::fs::read_to_string(path) else {
            return Vec::new();
        };
        match serde_json::from_str::<BTreeMap<String, Vec<CaptureRecord>>>(&text) {
            Ok(mut map) => map.remove(STORAGE_KEY).unwrap_or_default(),
            Err(e) => {
                tracing::debug!("capture file unreadable, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Validate and append a submission. Returns the new record on success.
    ///
    /// The in-memory append always succeeds for a valid address; the file
    /// write afterwards is best-effort and its failure is not reported.
    pub fn submit(&mut self, email: &str) -> Result<CaptureRecord, CaptureError> {
        let email = email.trim();
        if !is_email_shaped(email) {
            return Err(CaptureError::InvalidEmail(email.to_string()));
        }
        let record = CaptureRecord {
            email: email.to_string(),
            ts: unix_millis(),
        };
        self.records.push(record.clone());
        if let Err(e) = self.persist() {
            tracing::debug!("capture backup write failed: {e}");
        }
        Ok(record)
    }

    pub fn records(&self) -> &[CaptureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), CaptureError> {
        let mut map = BTreeMap::new();
        map.insert(STORAGE_KEY.to_string(), &self.records);
        let text = serde_json::to_string_pretty(&map)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
