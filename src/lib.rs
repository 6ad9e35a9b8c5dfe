//! destinii - sort the files of a directory into category folders
//!
//! This library classifies files by extension into a fixed set of
//! categories, moves them into matching subfolders of a managed directory,
//! and keeps an append-only, human-readable log of every pass. The managed
//! directory and the log are persisted in plain-text files so a front end
//! only needs three calls: save a path, run a pass, read the history.

pub mod cli;
pub mod config;
pub mod directory_pass;
pub mod file_category;
pub mod file_organizer;
pub mod manager;
pub mod output;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use directory_pass::{DirectoryPass, FailurePolicy, PassOutcome};
pub use file_category::{CATCH_ALL, CATEGORIES, Category, CategoryTable};
pub use file_organizer::{
    ErrorKind, FileOrganizer, LogEntry, MoveOutcome, MoveResult, OrganizeError, OrganizeResult,
};
pub use manager::FileManager;
pub use store::{LogStore, PathStore};

pub use cli::{Cli, OrganizeCommand, run_cli, run_cli_with_config};
