//! The operations a front end needs: save a target path, run a pass, read
//! the history.

use crate::config::StoreConfig;
use crate::directory_pass::{DirectoryPass, FailurePolicy, PassOutcome};
use crate::file_category::CategoryTable;
use crate::file_organizer::OrganizeResult;
use crate::store::{LogStore, PathStore};
use std::path::{Path, PathBuf};
use tracing::info;

/// Ties the path store, the log store and the directory pass together.
///
/// # Examples
///
/// ```no_run
/// use destinii::{FileManager, PassOutcome, StoreConfig};
///
/// let manager = FileManager::new(&StoreConfig::default());
/// manager.configure_path("/home/me/Downloads")?;
/// match manager.run_organize_pass(|done, total| println!("{}/{}", done, total))? {
///     PassOutcome::NoFiles => println!("No files found in the specified directory."),
///     PassOutcome::Completed { entries } => println!("{} lines logged", entries.len()),
/// }
/// print!("{}", manager.history()?);
/// # Ok::<(), destinii::OrganizeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileManager {
    paths: PathStore,
    log: LogStore,
    pass: DirectoryPass,
}

impl FileManager {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            paths: PathStore::new(&config.store.path_file),
            log: LogStore::new(&config.store.log_file),
            pass: DirectoryPass::new(CategoryTable::default(), config.organize.on_error),
        }
    }

    /// Overrides the failure policy from the configuration.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.pass = DirectoryPass::new(CategoryTable::default(), policy);
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.pass.policy()
    }

    /// Validates and stores the directory to manage.
    pub fn configure_path(&self, path: impl AsRef<Path>) -> OrganizeResult<PathBuf> {
        let path = path.as_ref();
        self.paths.save(path)?;
        info!(path = %path.display(), "target directory configured");
        Ok(path.to_path_buf())
    }

    /// Returns the configured directory, if any.
    pub fn target(&self) -> OrganizeResult<PathBuf> {
        self.paths.load()
    }

    /// Counts the files waiting in the configured directory.
    pub fn pending_files(&self) -> OrganizeResult<usize> {
        self.pass.pending_files(&self.paths.load()?)
    }

    /// Organizes the configured directory and logs what was done.
    ///
    /// The stored path is loaded and validated before any file is touched.
    /// Entries are appended to the log only when the pass completes; a pass
    /// that finds no files, or that aborts, appends nothing.
    pub fn run_organize_pass<F>(&self, on_progress: F) -> OrganizeResult<PassOutcome>
    where
        F: FnMut(usize, usize),
    {
        let target = self.paths.load()?;
        let outcome = self.pass.run(&target, on_progress)?;
        self.log.append(outcome.entries())?;
        Ok(outcome)
    }

    /// Returns the accumulated action log verbatim.
    pub fn history(&self) -> OrganizeResult<String> {
        self.log.read()
    }
}
