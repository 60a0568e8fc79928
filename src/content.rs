//! Token substitution inside file contents.

use crate::error::{Error, Result};
use crate::pattern::PatternSet;
use log::{debug, warn};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of the content stage.
#[derive(Debug, Default)]
pub struct ContentReport {
    /// Files whose content changed (or would change in a dry run)
    pub rewritten: Vec<PathBuf>,
    /// Number of files that contained no token
    pub unchanged: usize,
    /// Per-file failures; other files were still processed
    pub failures: Vec<Error>,
}

impl ContentReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::IoFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if bytes.contains(&0) {
        return Err(Error::IoFailure {
            path: path.to_path_buf(),
            reason: "binary content is not supported".to_string(),
        });
    }
    String::from_utf8(bytes).map_err(|_| Error::IoFailure {
        path: path.to_path_buf(),
        reason: "content is not valid UTF-8 text".to_string(),
    })
}

/// Replaces every token in the file at `path`.
///
/// The file is only written when its content changes. Returns whether it
/// changed.
///
/// # Errors
/// * `Error::IoFailure` if the file is not UTF-8 text or cannot be read or
///   written
pub fn rewrite_file<P: AsRef<Path>>(
    path: P,
    patterns: &PatternSet,
    dry_run: bool,
) -> Result<bool> {
    let path = path.as_ref();
    let content = read_text(path)?;

    match patterns.apply(&content) {
        Cow::Borrowed(_) => Ok(false),
        Cow::Owned(rewritten) => {
            if dry_run {
                debug!("Would rewrite file: {}", path.display());
            } else {
                debug!("Rewriting file: {}", path.display());
                fs::write(path, rewritten).map_err(|e| Error::IoFailure {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
            }
            Ok(true)
        }
    }
}

/// Rewrites every file in `files` (paths relative to `root`).
///
/// A failing file is recorded in the report and the remaining files are
/// still processed.
pub fn rewrite_contents<P: AsRef<Path>>(
    root: P,
    files: &[PathBuf],
    patterns: &PatternSet,
    dry_run: bool,
) -> ContentReport {
    let root = root.as_ref();
    let mut report = ContentReport::default();

    for file in files {
        match rewrite_file(root.join(file), patterns, dry_run) {
            Ok(true) => report.rewritten.push(file.clone()),
            Ok(false) => report.unchanged += 1,
            Err(e) => {
                warn!("{}", e);
                report.failures.push(e);
            }
        }
    }

    report
}
