//! One organize pass over a target directory.
//!
//! The pass lists the direct children of the directory, keeps regular files,
//! classifies each one and moves it into its category folder. Progress is
//! reported through a caller-supplied callback after every file.

use crate::file_category::CategoryTable;
use crate::file_organizer::{
    FileOrganizer, LogEntry, MoveOutcome, MoveResult, OrganizeError, OrganizeResult,
    validate_directory,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What a pass does when a single file cannot be moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the pass at the first failure. Files already moved stay moved.
    #[default]
    Abort,
    /// Record the file as skipped and carry on with the rest.
    #[serde(alias = "skip-and-continue")]
    Skip,
}

/// Result of a pass that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// The directory held no regular files. Nothing was touched.
    NoFiles,
    /// One entry per file, followed by `LogEntry::Completed`.
    Completed { entries: Vec<LogEntry> },
}

impl PassOutcome {
    /// Returns the log entries of the pass (empty for `NoFiles`).
    pub fn entries(&self) -> &[LogEntry] {
        match self {
            PassOutcome::NoFiles => &[],
            PassOutcome::Completed { entries } => entries,
        }
    }

    /// Returns the per-file results, without the completion marker.
    pub fn results(&self) -> impl Iterator<Item = &MoveResult> {
        self.entries().iter().filter_map(|entry| match entry {
            LogEntry::Moved(result) => Some(result),
            LogEntry::Completed => None,
        })
    }

    /// Counts successfully moved files per category.
    pub fn category_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for result in self.results().filter(|r| r.is_success()) {
            *counts.entry(result.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Counts files the pass recorded as skipped.
    pub fn skipped_count(&self) -> usize {
        self.results().filter(|r| !r.is_success()).count()
    }
}

/// Runs organize passes with a given category table and failure policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryPass {
    table: CategoryTable,
    policy: FailurePolicy,
}

impl DirectoryPass {
    pub fn new(table: CategoryTable, policy: FailurePolicy) -> Self {
        Self { table, policy }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Counts the regular files a pass over `target` would pick up.
    pub fn pending_files(&self, target: &Path) -> OrganizeResult<usize> {
        validate_directory(target)?;
        Ok(collect_files(target)?.len())
    }

    /// Organizes the regular files directly inside `target`.
    ///
    /// `on_progress(processed, total)` is called once after every file.
    /// Directories, including category folders from earlier passes, are
    /// never descended into or moved.
    ///
    /// # Errors
    ///
    /// * `InvalidDirectory` if `target` is missing or not a directory; nothing
    ///   is touched in that case.
    /// * `DirectoryReadFailed` if the listing fails.
    /// * Any move error, when the policy is `Abort`.
    pub fn run<F>(&self, target: &Path, mut on_progress: F) -> OrganizeResult<PassOutcome>
    where
        F: FnMut(usize, usize),
    {
        validate_directory(target)?;

        let files = collect_files(target)?;
        let total = files.len();
        if total == 0 {
            info!(dir = %target.display(), "no files found");
            return Ok(PassOutcome::NoFiles);
        }

        info!(dir = %target.display(), total, "starting organize pass");

        let mut entries = Vec::with_capacity(total + 1);
        for (index, path) in files.iter().enumerate() {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let category = self.table.classify(&file_name);

            let result = match FileOrganizer::move_file(path, target, category) {
                Ok(result) => result,
                Err(e) => match self.policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Skip => {
                        warn!(file = %file_name, error = %e, "skipping file");
                        MoveResult {
                            file_name,
                            category: category.to_string(),
                            outcome: MoveOutcome::Skipped {
                                reason: e.to_string(),
                            },
                        }
                    }
                },
            };

            entries.push(LogEntry::Moved(result));
            on_progress(index + 1, total);
        }
        entries.push(LogEntry::Completed);

        info!(dir = %target.display(), total, "organize pass completed");
        Ok(PassOutcome::Completed { entries })
    }
}

/// Lists the regular files directly inside `dir`, following symlinks.
fn collect_files(dir: &Path) -> OrganizeResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| OrganizeError::DirectoryReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| OrganizeError::DirectoryReadFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_organizer::ErrorKind;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), name).expect("Failed to write test file");
    }

    #[test]
    fn test_pass_moves_every_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        for name in ["report.pdf", "photo.JPG", "notes.md", "archive.zip"] {
            touch(base, name);
        }

        let outcome = DirectoryPass::default()
            .run(base, |_, _| {})
            .expect("Pass failed");

        let entries = outcome.entries();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries.last(), Some(&LogEntry::Completed));
        assert!(base.join("PDF Files/report.pdf").exists());
        assert!(base.join("Images/photo.JPG").exists());
        assert!(base.join("Text Files/notes.md").exists());
        assert!(base.join("Others/archive.zip").exists());
        assert!(!base.join("report.pdf").exists());
    }

    #[test]
    fn test_progress_reported_after_each_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        for name in ["a.mp3", "b.mp4", "c.txt"] {
            touch(base, name);
        }

        let mut seen = Vec::new();
        DirectoryPass::default()
            .run(base, |done, total| seen.push((done, total)))
            .expect("Pass failed");

        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_empty_directory_creates_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("Images")).unwrap();

        let mut calls = 0;
        let outcome = DirectoryPass::default()
            .run(base, |_, _| calls += 1)
            .expect("Pass failed");

        assert_eq!(outcome, PassOutcome::NoFiles);
        assert!(outcome.entries().is_empty());
        assert_eq!(calls, 0);
        let children = fs::read_dir(base).unwrap().count();
        assert_eq!(children, 1);
    }

    #[test]
    fn test_subdirectories_are_left_alone() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("nested.pdf")).unwrap();
        touch(&base.join("nested.pdf"), "inner.txt");
        touch(base, "song.wav");

        let outcome = DirectoryPass::default()
            .run(base, |_, _| {})
            .expect("Pass failed");

        assert_eq!(outcome.results().count(), 1);
        assert!(base.join("nested.pdf/inner.txt").exists());
        assert!(base.join("Audio Files/song.wav").exists());
    }

    #[test]
    fn test_pending_files_counts_regular_files_only() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("Images")).unwrap();
        touch(&base.join("Images"), "old.png");
        touch(base, "a.pdf");
        touch(base, "b.txt");

        let pass = DirectoryPass::default();
        assert_eq!(pass.pending_files(base).unwrap(), 2);

        pass.run(base, |_, _| {}).expect("Pass failed");
        assert_eq!(pass.pending_files(base).unwrap(), 0);
    }

    #[test]
    fn test_invalid_target_rejected() {
        let err = DirectoryPass::default()
            .run(Path::new("/non/existent/path"), |_, _| {})
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    }

    fn conflicted_dir() -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("Images")).unwrap();
        touch(&base.join("Images"), "dup.png");
        touch(base, "dup.png");
        touch(base, "clip.mkv");
        temp_dir
    }

    #[test]
    fn test_abort_policy_stops_on_conflict() {
        let temp_dir = conflicted_dir();
        let base = temp_dir.path();

        let err = DirectoryPass::new(CategoryTable::default(), FailurePolicy::Abort)
            .run(base, |_, _| {})
            .unwrap_err();

        assert!(matches!(err, OrganizeError::DestinationExists { .. }));
        assert!(base.join("dup.png").exists());
    }

    #[test]
    fn test_abort_keeps_files_moved_before_the_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("Images")).unwrap();
        touch(&base.join("Images"), "dup.png");
        touch(base, "dup.png");
        let others = [
            ("a.pdf", "PDF Files"),
            ("b.mp3", "Audio Files"),
            ("c.mov", "Video Files"),
            ("d.txt", "Text Files"),
            ("e.zip", "Others"),
        ];
        for (name, _) in others {
            touch(base, name);
        }

        let mut calls = 0;
        let err = DirectoryPass::new(CategoryTable::default(), FailurePolicy::Abort)
            .run(base, |_, _| calls += 1)
            .unwrap_err();
        assert!(matches!(err, OrganizeError::DestinationExists { .. }));

        let mut moved = 0;
        for (name, category) in others {
            let original = base.join(name).exists();
            let sorted = base.join(category).join(name).exists();
            assert!(original != sorted, "{} should be in exactly one place", name);
            if sorted {
                moved += 1;
                assert_eq!(fs::read_to_string(base.join(category).join(name)).unwrap(), name);
            }
        }
        assert_eq!(calls, moved);
        assert!(base.join("dup.png").exists());
        assert_eq!(fs::read_to_string(base.join("Images/dup.png")).unwrap(), "dup.png");
    }

    #[test]
    fn test_skip_policy_continues_past_conflict() {
        let temp_dir = conflicted_dir();
        let base = temp_dir.path();

        let mut last = (0, 0);
        let outcome = DirectoryPass::new(CategoryTable::default(), FailurePolicy::Skip)
            .run(base, |done, total| last = (done, total))
            .expect("Pass failed");

        assert_eq!(last, (2, 2));
        assert!(base.join("dup.png").exists());
        assert!(base.join("Video Files/clip.mkv").exists());

        let skipped: Vec<_> = outcome.results().filter(|r| !r.is_success()).collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].file_name, "dup.png");
        assert_eq!(outcome.category_counts().get("Video Files"), Some(&1));
        assert_eq!(outcome.category_counts().get("Images"), None);
    }

    #[test]
    fn test_failure_policy_from_toml_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            on_error: FailurePolicy,
        }
        let parsed: Wrapper = toml::from_str("on_error = \"skip\"").unwrap();
        assert_eq!(parsed.on_error, FailurePolicy::Skip);
        let parsed: Wrapper = toml::from_str("on_error = \"abort\"").unwrap();
        assert_eq!(parsed.on_error, FailurePolicy::Abort);
    }
}
