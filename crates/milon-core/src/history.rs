use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::StorageError;

/// Flat, append-only record of every word already delivered.
///
/// The whole log lives in one JSON array of strings. It is read once per run
/// and rewritten in full after a successful daily delivery. There is no
/// locking: two concurrent runs on the same file may lose entries.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the log. A missing file is an empty history, a malformed one is
    /// an error and is never reset.
    pub fn load(&self) -> Result<Vec<String>, StorageError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No history at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let log: Vec<String> =
            serde_json::from_str(&data).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!("Loaded {} history entries", log.len());
        Ok(log)
    }

    /// Replace the stored log with `log`.
    ///
    /// Writes a sibling temp file and renames it over the target, so a failed
    /// save leaves the previous document untouched.
    pub fn save(&self, log: &[String]) -> Result<(), StorageError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        log.serialize(&mut ser).map_err(StorageError::Serialize)?;
        buf.push(b'\n');

        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp = self.temp_path();
        let written = File::create(&tmp).and_then(|mut file| {
            file.write_all(&buf)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|_| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e));
        }

        tracing::info!(
            "Saved {} history entries to {}",
            log.len(),
            self.path.display()
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "history.json".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

/// The last `k` entries, or the whole log if it is shorter.
pub fn recent(log: &[String], k: usize) -> &[String] {
    &log[log.len().saturating_sub(k)..]
}
