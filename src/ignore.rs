//! Exclusion rules for the tree scan.
//! A fixed denylist of tooling and metadata names is always applied; extra
//! glob patterns can come from the `.initignore` file in the root and from
//! the command line, similar to .gitignore functionality.

use crate::constants::{EXCLUDED_NAMES, IGNORE_FILE};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::fs::read_to_string;
use std::path::Path;

/// Decides which entries the scanner must never visit.
#[derive(Debug, Clone)]
pub struct Exclusions {
    globs: GlobSet,
}

impl Default for Exclusions {
    fn default() -> Self {
        Self { globs: GlobSet::empty() }
    }
}

impl Exclusions {
    /// Creates exclusions from the built-in denylist plus the given globs.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            builder.add(Glob::new(pattern).map_err(|e| {
                Error::IgnoreError(format!("invalid pattern '{}': {}", pattern, e))
            })?);
        }
        let globs = builder.build().map_err(|e| Error::IgnoreError(e.to_string()))?;
        Ok(Self { globs })
    }

    /// Builds exclusions for `root`, combining the root's ignore file with
    /// the extra command line patterns.
    pub fn for_root<P: AsRef<Path>, S: AsRef<str>>(root: P, extra: &[S]) -> Result<Self> {
        let mut patterns = parse_ignore_file(root.as_ref().join(IGNORE_FILE))?;
        patterns.extend(extra.iter().map(|p| p.as_ref().to_string()));
        Self::new(&patterns)
    }

    /// Returns true when an entry with this name and root-relative path must
    /// be skipped along with everything beneath it.
    pub fn is_excluded<P: AsRef<Path>>(&self, name: &str, relative_path: P) -> bool {
        EXCLUDED_NAMES.contains(&name)
            || self.globs.is_match(name)
            || self.globs.is_match(relative_path.as_ref())
    }
}

/// Reads glob patterns from an ignore file, one per line.
///
/// # Notes
/// - A missing file yields no patterns
/// - Blank lines and lines starting with `#` are skipped
pub fn parse_ignore_file<P: AsRef<Path>>(ignore_path: P) -> Result<Vec<String>> {
    let ignore_path = ignore_path.as_ref();
    let contents = match read_to_string(ignore_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} does not exist", ignore_path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(Error::IoError(e)),
    };

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}
