//! Append-only record journal
//!
//! The journal holds every [`Record`] ever created, one JSON object per line,
//! in creation order. Replaying it reproduces each code's history exactly.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use super::Record;
use crate::errors::{RelinkerError, Result};

pub trait Journal: Send + Sync {
    /// Durably records `record`. Called while the store's exclusive mode is
    /// held, before the in-memory append.
    fn append(&self, record: &Record) -> Result<()>;

    /// Every record in the order it was appended.
    fn load(&self) -> Result<Vec<Record>>;

    fn backend_name(&self) -> &'static str;
}

/// In-memory deployments: nothing is persisted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullJournal;

impl Journal for NullJournal {
    fn append(&self, _record: &Record) -> Result<()> {
        Ok(())
    }

    fn load(&self) -> Result<Vec<Record>> {
        Ok(Vec::new())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// JSON Lines journal on the local filesystem.
#[derive(Debug)]
pub struct FileJournal {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileJournal {
    /// Opens `path` for appending, creating it (and its parent directory) if
    /// missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                error!("Failed to open journal {}: {}", path.display(), e);
                RelinkerError::file_operation(format!(
                    "Failed to open journal {}: {}",
                    path.display(),
                    e
                ))
            })?;

        info!("Journal opened: {}", path.display());
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Runs `write` against `file`; on any error the file is cut back to its
/// previous length so no partial line survives.
fn write_or_rollback<F>(file: &mut File, write: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let len = file.metadata()?.len();
    if let Err(e) = write(file) {
        if let Err(rollback) = file.set_len(len).and_then(|_| file.sync_data()) {
            error!("Journal rollback to {} bytes failed: {}", len, rollback);
        }
        return Err(e);
    }
    Ok(())
}

impl Journal for FileJournal {
    fn append(&self, record: &Record) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = self.file.lock();
        write_or_rollback(&mut file, |file| {
            file.write_all(line.as_bytes())?;
            file.sync_data()
        })
        .map_err(|e| {
            error!(code = %record.code, "Journal write failed: {}", e);
            RelinkerError::file_operation(format!(
                "Failed to write journal {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!(code = %record.code, "Journal entry written");
        Ok(())
    }

    /// A trailing line without `\n` is a torn append and is cut off the file.
    fn load(&self) -> Result<Vec<Record>> {
        let content = std::fs::read_to_string(&self.path)?;
        let complete_len = content.rfind('\n').map_or(0, |i| i + 1);

        if complete_len < content.len() {
            warn!(
                "Truncating torn journal tail in {} ({} bytes)",
                self.path.display(),
                content.len() - complete_len
            );
            let file = self.file.lock();
            file.set_len(complete_len as u64)?;
            file.sync_data()?;
        }

        let mut records = Vec::new();
        for (index, line) in content[..complete_len].lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let record: Record = serde_json::from_str(line).map_err(|e| {
                RelinkerError::serialization(format!(
                    "{}:{}: invalid journal entry: {}",
                    self.path.display(),
                    index + 1,
                    e
                ))
            })?;
            records.push(record);
        }

        Ok(records)
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
