//! Error handling for projinit.
//! Defines the error taxonomy and result type used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring a project tree.
///
/// Validation, scan and ignore errors happen before anything on disk changes.
/// `Conflict` and `RenameFailure` stop the path stage. `IoFailure` is reported
/// per file by the content stage and never stops other files.
#[derive(Error, Debug)]
pub enum Error {
    /// A supplied value would corrupt a token or produce an unusable path
    #[error("Invalid input: {0}.")]
    InvalidInput(String),

    /// The root directory or one of its subdirectories could not be read
    #[error("Failed to scan '{path}': {reason}.")]
    ScanFailure { path: PathBuf, reason: String },

    /// A rename target already exists or two entries would share one path
    #[error("Rename target '{path}' already exists.")]
    Conflict { path: PathBuf },

    /// The operating system refused a rename
    #[error("Failed to rename '{from}' to '{to}': {source}.")]
    RenameFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file could not be read as text or written back
    #[error("Failed to rewrite '{path}': {reason}.")]
    IoFailure { path: PathBuf, reason: String },

    /// An exclusion glob could not be compiled
    #[error("Ignore pattern error: {0}.")]
    IgnoreError(String),

    /// Interactive input could not be read
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Represents errors that occur during other file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{}", err);
    std::process::exit(1);
}
