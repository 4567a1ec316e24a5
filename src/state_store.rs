//! Snapshot of values overwritten by `on`
//!
//! A flat JSON object mapping a key (usually the sysfs path that was
//! overwritten) to the string value it held before. `on` records values here,
//! `off` reads them back. There is no locking: the last writer wins.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;

/// Snapshot contents, serialized as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<String, String>);

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deref for Snapshot {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Snapshot {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Handle to the snapshot file. Cheap to clone, holds no open file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole snapshot.
    ///
    /// A missing, unreadable or malformed file yields an empty snapshot;
    /// this never fails.
    pub fn load(&self) -> Snapshot {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No snapshot at {}: {}", self.path.display(), e);
                return Snapshot::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                debug!("Ignoring malformed snapshot {}: {}", self.path.display(), e);
                Snapshot::new()
            }
        }
    }

    /// Value stored under `key`, or `default` when absent.
    pub fn get(&self, key: &str, default: &str) -> String {
        self.load()
            .remove(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Store one value, keeping every other entry.
    ///
    /// The merged snapshot goes to a freshly created, randomly named file
    /// next to the snapshot (`O_EXCL`, never through an existing link) and
    /// is then renamed over it, so a crash never leaves a truncated file.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut snapshot = self.load();
        snapshot.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string(&snapshot)?;
        let mut temp = NamedTempFile::new_in(self.parent_dir())?;
        temp.write_all(json.as_bytes())?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        debug!("Stored {}={:?} in {}", key, value, self.path.display());
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}
