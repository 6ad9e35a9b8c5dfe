//! Command-line front end.
//!
//! Maps the three caller-facing operations onto subcommands:
//! - `set-path <DIR>` saves the directory to manage
//! - `run` organizes it, drawing a progress bar while files move
//! - `history` prints the action log

use crate::config::StoreConfig;
use crate::directory_pass::{FailurePolicy, PassOutcome};
use crate::file_organizer::{ErrorKind, OrganizeError};
use crate::manager::FileManager;
use crate::output::OutputFormatter;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// destinii - sort a directory's files into category folders
#[derive(Parser, Debug)]
#[command(name = "destinii")]
#[command(about = "Organize the files of a directory into category folders by extension", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: ./.destiniirc.toml, then ~/.config/destinii/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: OrganizeCommand,
}

/// Represents a CLI command to execute.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum OrganizeCommand {
    /// Save the directory that will be organized
    SetPath {
        /// Directory to manage
        path: PathBuf,
    },
    /// Organize the saved directory
    Run {
        /// Skip files that cannot be moved instead of stopping
        #[arg(short, long)]
        keep_going: bool,
    },
    /// Print every action logged so far
    History,
}

/// Runs a command, loading configuration from `config_path` or the usual places.
///
/// # Examples
///
/// ```no_run
/// use destinii::cli::{run_cli_with_config, OrganizeCommand};
///
/// let result = run_cli_with_config(OrganizeCommand::Run { keep_going: false }, None);
/// if let Err(e) = result {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli_with_config(
    command: OrganizeCommand,
    config_path: Option<&Path>,
) -> Result<(), String> {
    let config =
        StoreConfig::load(config_path).map_err(|e| format!("Error loading configuration: {}", e))?;
    run_cli(command, &FileManager::new(&config))
}

/// Runs a command against an already built manager.
pub fn run_cli(command: OrganizeCommand, manager: &FileManager) -> Result<(), String> {
    match command {
        OrganizeCommand::SetPath { path } => save_path(manager, &path),
        OrganizeCommand::Run { keep_going } => {
            if keep_going {
                organize(&manager.clone().with_policy(FailurePolicy::Skip))
            } else {
                organize(manager)
            }
        }
        OrganizeCommand::History => show_history(manager),
    }
}

fn save_path(manager: &FileManager, path: &Path) -> Result<(), String> {
    match manager.configure_path(path) {
        Ok(_) => {
            OutputFormatter::success("Path saved successfully.");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::ValidationFailure => Err(format!(
            "Invalid Path: {} does not exist or is not a directory.",
            path.display()
        )),
        Err(e) => Err(e.to_string()),
    }
}

fn organize(manager: &FileManager) -> Result<(), String> {
    if let Ok(target) = manager.target() {
        OutputFormatter::info(&format!("Organizing contents of: {}", target.display()));
    }

    // No bar when counting fails; the pass reports the error.
    let progress = manager
        .pending_files()
        .ok()
        .filter(|&n| n > 0)
        .map(|n| OutputFormatter::create_progress_bar(n as u64));
    let result = manager.run_organize_pass(|done, total| {
        if let Some(pb) = &progress {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        }
    });
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let outcome = result.map_err(describe_failure)?;
    match &outcome {
        PassOutcome::NoFiles => {
            OutputFormatter::info("No files found in the specified directory.");
        }
        PassOutcome::Completed { entries } => {
            for entry in entries {
                OutputFormatter::plain(&entry.to_string());
            }
            OutputFormatter::pass_summary(&outcome);
        }
    }
    Ok(())
}

fn show_history(manager: &FileManager) -> Result<(), String> {
    let history = manager.history().map_err(|e| e.to_string())?;
    if history.is_empty() {
        OutputFormatter::info("No actions logged yet.");
    } else {
        print!("{}", history);
    }
    Ok(())
}

fn describe_failure(e: OrganizeError) -> String {
    match e.kind() {
        ErrorKind::ConfigMissing => format!("{} Use 'destinii set-path <DIR>'.", e),
        ErrorKind::ValidationFailure => e.to_string(),
        ErrorKind::IoFailure => format!(
            "{}\nThe pass stopped here. Files already moved stay in their folders; \
             rerun with --keep-going to skip problem files.",
            e
        ),
    }
}
