//! projinit turns a checked out template project into a new project.
//! It replaces the `__PROJID__`, `<PROJECT_NAME>` and `<EXEC>` tokens in
//! directory names, file names and file contents, in place.

/// Command-line interface module for the projinit application
pub mod cli;

/// Tokens, exclusion names and id bounds
pub mod constants;

/// Token substitution inside file contents
pub mod content;

/// Error types and handling for the projinit application
pub mod error;

/// Built-in and user supplied exclusion rules
pub mod ignore;

/// Logger setup
pub mod logger;

/// Substitution patterns, project ids and input validation
pub mod pattern;

/// Run orchestration
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Parent-before-child renaming of tokenized paths
pub mod rename;

/// Read-only traversal of the project tree
pub mod scanner;
