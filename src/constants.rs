//! Common constants used throughout projinit.

/// Token replaced by the numeric project id.
pub const PROJID_TOKEN: &str = "__PROJID__";

/// Token replaced by the project name.
pub const PROJECT_NAME_TOKEN: &str = "<PROJECT_NAME>";

/// Token replaced by the executable name.
pub const EXEC_TOKEN: &str = "<EXEC>";

/// Smallest generated or accepted project id.
pub const PROJECT_ID_MIN: u32 = 100_000;

/// Largest generated or accepted project id.
pub const PROJECT_ID_MAX: u32 = 999_999;

/// Optional file in the root listing extra exclusion globs
pub const IGNORE_FILE: &str = ".initignore";

/// Entry marking the root as a template checkout
pub const CHECKOUT_MARKER: &str = ".git";

/// Entry names that are never scanned, renamed or rewritten.
pub const EXCLUDED_NAMES: [&str; 11] = [
    CHECKOUT_MARKER,
    ".gitignore",
    ".vscode",
    "build",
    "configure_project.js",
    "init_project.cpp",
    "CLI11.hpp",
    "package.json",
    "package-lock.json",
    "node_modules",
    IGNORE_FILE,
];
