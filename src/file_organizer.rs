//! Moving files into category folders.
//!
//! This module relocates a single file into `<target>/<category>/`, describes
//! the outcome as a `MoveResult`, and defines the error type shared by the
//! rest of the crate.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What happened to one file during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The file now lives in its category folder.
    Success,
    /// The file was left in place; only produced when a pass keeps going
    /// past failures.
    Skipped { reason: String },
}

/// Record of one file processed during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Base name of the file.
    pub file_name: String,
    /// Category (and folder) the file was sorted into.
    pub category: String,
    /// Whether the move happened.
    pub outcome: MoveOutcome,
}

impl MoveResult {
    pub fn is_success(&self) -> bool {
        self.outcome == MoveOutcome::Success
    }
}

/// One line of the action log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// A file processed during the pass.
    Moved(MoveResult),
    /// Terminal marker written at the end of every pass.
    Completed,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Moved(MoveResult {
                file_name,
                category,
                outcome: MoveOutcome::Success,
            }) => write!(f, "MOVED - {} to {}/", file_name, category),
            LogEntry::Moved(MoveResult {
                file_name,
                outcome: MoveOutcome::Skipped { reason },
                ..
            }) => write!(f, "SKIPPED - {}: {}", file_name, reason),
            LogEntry::Completed => write!(f, "Process Completed"),
        }
    }
}

/// Broad classes of failure, as seen by a caller deciding what to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No target directory has been configured yet.
    ConfigMissing,
    /// A supplied or stored path is missing or not a directory.
    ValidationFailure,
    /// A filesystem operation failed.
    IoFailure,
}

/// Errors that can occur while configuring, organizing or reading history.
#[derive(Debug)]
pub enum OrganizeError {
    /// No target directory has ever been saved.
    NotConfigured { store: PathBuf },
    /// The path does not exist or is not a directory.
    InvalidDirectory { path: PathBuf, reason: String },
    /// Failed to create a category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An entry with the same name already sits in the category folder.
    DestinationExists { path: PathBuf },
    /// Failed to move a file to its category directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// Failed to list the target directory.
    DirectoryReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to read or write the stored target path.
    PathStoreFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to append to the action log.
    LogWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to read the action log.
    LogReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl OrganizeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotConfigured { .. } => ErrorKind::ConfigMissing,
            Self::InvalidDirectory { .. } => ErrorKind::ValidationFailure,
            Self::DirectoryCreationFailed { .. }
            | Self::DestinationExists { .. }
            | Self::FileMoveFailure { .. }
            | Self::DirectoryReadFailed { .. }
            | Self::PathStoreFailed { .. }
            | Self::LogWriteFailed { .. }
            | Self::LogReadFailed { .. } => ErrorKind::IoFailure,
        }
    }
}

impl fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured { store } => {
                write!(
                    f,
                    "No directory configured yet ({} not found). Save a path first.",
                    store.display()
                )
            }
            Self::InvalidDirectory { path, reason } => {
                write!(f, "The path {} is not a valid directory: {}", path.display(), reason)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::DestinationExists { path } => {
                write!(f, "Destination path {} already exists", path.display())
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::DirectoryReadFailed { path, source } => {
                write!(f, "Error reading directory {}: {}", path.display(), source)
            }
            Self::PathStoreFailed { path, source } => {
                write!(f, "Failed to access path file {}: {}", path.display(), source)
            }
            Self::LogWriteFailed { path, source } => {
                write!(f, "Failed to write log file {}: {}", path.display(), source)
            }
            Self::LogReadFailed { path, source } => {
                write!(f, "Failed to read log file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryCreationFailed { source, .. }
            | Self::DirectoryReadFailed { source, .. }
            | Self::PathStoreFailed { source, .. }
            | Self::LogWriteFailed { source, .. }
            | Self::LogReadFailed { source, .. } => Some(source),
            Self::FileMoveFailure { source_error, .. } => Some(source_error),
            Self::NotConfigured { .. }
            | Self::InvalidDirectory { .. }
            | Self::DestinationExists { .. } => None,
        }
    }
}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Checks that `path` exists and is a directory.
pub fn validate_directory(path: &Path) -> OrganizeResult<()> {
    if !path.exists() {
        return Err(OrganizeError::InvalidDirectory {
            path: path.to_path_buf(),
            reason: "path does not exist".to_string(),
        });
    }
    if !path.is_dir() {
        return Err(OrganizeError::InvalidDirectory {
            path: path.to_path_buf(),
            reason: "path is not a directory".to_string(),
        });
    }
    Ok(())
}

/// Moves files into category subdirectories.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Moves a file into `<target_dir>/<category>/`, keeping its base name.
    ///
    /// The category directory is created if missing; an existing one is
    /// reused. A file that already exists under the same name in the
    /// category directory is never overwritten: the move fails with
    /// `DestinationExists` and the source stays where it was.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use destinii::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let result = FileOrganizer::move_file(
    ///     Path::new("/home/me/Downloads/photo.png"),
    ///     Path::new("/home/me/Downloads"),
    ///     "Images",
    /// );
    ///
    /// match result {
    ///     Ok(moved) => println!("Moved {} to {}/", moved.file_name, moved.category),
    ///     Err(e) => eprintln!("Organization failed: {}", e),
    /// }
    /// ```
    pub fn move_file(
        source: &Path,
        target_dir: &Path,
        category: &str,
    ) -> OrganizeResult<MoveResult> {
        let category_path = target_dir.join(category);

        let file_name = source
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailure {
                source: source.to_path_buf(),
                destination: category_path.clone(),
                source_error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;

        // Checked before creating the folder so a vanished source leaves no trace
        if fs::symlink_metadata(source).is_err() {
            return Err(OrganizeError::FileMoveFailure {
                source: source.to_path_buf(),
                destination: category_path.join(file_name),
                source_error: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "source file no longer exists",
                ),
            });
        }

        fs::create_dir_all(&category_path).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: category_path.clone(),
            source: e,
        })?;

        let destination_path = category_path.join(file_name);
        if fs::symlink_metadata(&destination_path).is_ok() {
            return Err(OrganizeError::DestinationExists {
                path: destination_path,
            });
        }

        fs::rename(source, &destination_path).map_err(|e| OrganizeError::FileMoveFailure {
            source: source.to_path_buf(),
            destination: destination_path.clone(),
            source_error: e,
        })?;

        debug!(
            from = %source.display(),
            to = %destination_path.display(),
            "moved file"
        );

        Ok(MoveResult {
            file_name: file_name.to_string_lossy().into_owned(),
            category: category.to_string(),
            outcome: MoveOutcome::Success,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_move_file_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let file_path = base_path.join("test.txt");
        fs::write(&file_path, "test content").expect("Failed to write test file");

        let result =
            FileOrganizer::move_file(&file_path, base_path, "Text Files").expect("Failed to move file");

        let category_dir = base_path.join("Text Files");
        assert!(category_dir.is_dir());
        assert!(!file_path.exists());
        assert!(category_dir.join("test.txt").exists());
        assert_eq!(
            result,
            MoveResult {
                file_name: "test.txt".to_string(),
                category: "Text Files".to_string(),
                outcome: MoveOutcome::Success,
            }
        );
    }

    #[test]
    fn test_move_file_uses_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let category_dir = base_path.join("Images");
        fs::create_dir(&category_dir).expect("Failed to create category directory");
        fs::write(category_dir.join("older.png"), "old").expect("Failed to write file");

        let file_path = base_path.join("test.png");
        fs::write(&file_path, "test content").expect("Failed to write test file");

        FileOrganizer::move_file(&file_path, base_path, "Images").expect("Failed to move file");

        assert!(!file_path.exists());
        assert!(category_dir.join("test.png").exists());
        assert!(category_dir.join("older.png").exists());
    }

    #[test]
    fn test_move_file_refuses_to_overwrite() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let category_dir = base_path.join("PDF Files");
        fs::create_dir(&category_dir).expect("Failed to create category directory");
        fs::write(category_dir.join("report.pdf"), "first").expect("Failed to write file");

        let file_path = base_path.join("report.pdf");
        fs::write(&file_path, "second").expect("Failed to write file");

        let err = FileOrganizer::move_file(&file_path, base_path, "PDF Files").unwrap_err();
        assert!(matches!(err, OrganizeError::DestinationExists { .. }));
        assert_eq!(err.kind(), ErrorKind::IoFailure);

        assert!(file_path.exists());
        let kept = fs::read_to_string(category_dir.join("report.pdf")).unwrap();
        assert_eq!(kept, "first");
    }

    #[test]
    fn test_move_file_missing_source() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let err = FileOrganizer::move_file(&base_path.join("gone.txt"), base_path, "Text Files")
            .unwrap_err();
        assert!(matches!(err, OrganizeError::FileMoveFailure { .. }));
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(!base_path.join("Text Files").exists());
    }

    #[test]
    fn test_log_entry_lines() {
        let moved = LogEntry::Moved(MoveResult {
            file_name: "photo.JPG".to_string(),
            category: "Images".to_string(),
            outcome: MoveOutcome::Success,
        });
        assert_eq!(moved.to_string(), "MOVED - photo.JPG to Images/");
        assert_eq!(LogEntry::Completed.to_string(), "Process Completed");

        let skipped = LogEntry::Moved(MoveResult {
            file_name: "a.pdf".to_string(),
            category: "PDF Files".to_string(),
            outcome: MoveOutcome::Skipped {
                reason: "denied".to_string(),
            },
        });
        assert_eq!(skipped.to_string(), "SKIPPED - a.pdf: denied");
    }

    #[test]
    fn test_validate_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        assert!(validate_directory(temp_dir.path()).is_ok());

        let file_path = temp_dir.path().join("plain.txt");
        fs::write(&file_path, "x").unwrap();
        let err = validate_directory(&file_path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);

        let err = validate_directory(Path::new("/non/existent/path")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    }
}
