//! Durable state: the configured target directory and the action log.
//!
//! Both live in plain-text files. The path file holds a single line and is
//! overwritten on every save; the log file is only ever appended to.

use crate::file_organizer::{LogEntry, OrganizeError, OrganizeResult, validate_directory};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persists the single directory the organizer manages.
#[derive(Debug, Clone)]
pub struct PathStore {
    file: PathBuf,
}

impl PathStore {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Validates and stores `path`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDirectory` if `path` does not exist or is not a
    /// directory, or (outside Unix) is not valid UTF-8. The stored value is
    /// left untouched in that case.
    pub fn save(&self, path: &Path) -> OrganizeResult<()> {
        validate_directory(path)?;

        let mut line = path_to_bytes(path)?;
        line.push(b'\n');
        fs::write(&self.file, line).map_err(|e| OrganizeError::PathStoreFailed {
            path: self.file.clone(),
            source: e,
        })?;

        debug!(path = %path.display(), store = %self.file.display(), "saved target path");
        Ok(())
    }

    /// Returns the stored path.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` if nothing was ever saved.
    pub fn load(&self) -> OrganizeResult<PathBuf> {
        let content = match fs::read(&self.file) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(OrganizeError::NotConfigured {
                    store: self.file.clone(),
                });
            }
            Err(e) => {
                return Err(OrganizeError::PathStoreFailed {
                    path: self.file.clone(),
                    source: e,
                });
            }
        };

        let trimmed = content.trim_ascii();
        if trimmed.is_empty() {
            return Err(OrganizeError::NotConfigured {
                store: self.file.clone(),
            });
        }
        bytes_to_path(trimmed).ok_or_else(|| OrganizeError::PathStoreFailed {
            path: self.file.clone(),
            source: std::io::Error::new(ErrorKind::InvalidData, "stored path is not valid UTF-8"),
        })
    }
}

// Unix paths are arbitrary bytes; stored verbatim.
#[cfg(unix)]
fn path_to_bytes(path: &Path) -> OrganizeResult<Vec<u8>> {
    use std::os::unix::ffi::OsStrExt;
    Ok(path.as_os_str().as_bytes().to_vec())
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> Option<PathBuf> {
    use std::os::unix::ffi::OsStrExt;
    Some(PathBuf::from(std::ffi::OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
fn path_to_bytes(path: &Path) -> OrganizeResult<Vec<u8>> {
    path.to_str()
        .map(|s| s.as_bytes().to_vec())
        .ok_or_else(|| OrganizeError::InvalidDirectory {
            path: path.to_path_buf(),
            reason: "path is not valid UTF-8".to_string(),
        })
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> Option<PathBuf> {
    std::str::from_utf8(bytes).ok().map(PathBuf::from)
}

/// Append-only, human-readable history of organize passes.
#[derive(Debug, Clone)]
pub struct LogStore {
    file: PathBuf,
}

impl LogStore {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Appends one line per entry to the end of the log.
    pub fn append(&self, entries: &[LogEntry]) -> OrganizeResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let text: String = entries.iter().map(|entry| format!("{}\n", entry)).collect();

        let write_err = |e: std::io::Error| OrganizeError::LogWriteFailed {
            path: self.file.clone(),
            source: e,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file)
            .map_err(write_err)?;
        file.write_all(text.as_bytes()).map_err(write_err)?;

        debug!(lines = entries.len(), log = %self.file.display(), "appended to log");
        Ok(())
    }

    /// Returns the whole log, or an empty string if nothing was logged yet.
    pub fn read(&self) -> OrganizeResult<String> {
        match fs::read_to_string(&self.file) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(OrganizeError::LogReadFailed {
                path: self.file.clone(),
                source: e,
            }),
        }
    }
}
