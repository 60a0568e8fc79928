//! Renaming of directories and files whose names contain tokens.
//!
//! All new paths are computed into an old → new mapping first; only then are
//! renames carried out, directories parents-first and files last, so every
//! rename refers to a path that exists at that moment.

use crate::error::{Error, Result};
use crate::pattern::PatternSet;
use crate::scanner::{EntryKind, Scan};
use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A single rename of one path component.
///
/// Both paths are relative to the root. `from` is already expressed under
/// the renamed parent, so it is valid once earlier renames have run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub kind: EntryKind,
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Planned renames plus the full old → new path mapping.
#[derive(Debug, Default, Clone)]
pub struct RenamePlan {
    renames: Vec<Rename>,
    mapping: IndexMap<PathBuf, PathBuf>,
    files: Vec<PathBuf>,
}

/// Computes the new location of every scanned entry.
///
/// # Errors
/// * `Error::Conflict` if two entries would end up at the same path
pub fn plan_renames(scan: &Scan, patterns: &PatternSet) -> Result<RenamePlan> {
    let mut plan = RenamePlan::default();
    let mut targets = IndexSet::new();

    for entry in scan.dirs.iter().chain(scan.files.iter()) {
        let parent = entry.path.parent().unwrap_or_else(|| Path::new(""));
        let new_parent = plan
            .mapping
            .get(parent)
            .cloned()
            .unwrap_or_else(|| parent.to_path_buf());

        let Some(name) = entry.path.file_name() else {
            continue;
        };
        let current = new_parent.join(name);
        let target = match name.to_str() {
            Some(name) => new_parent.join(patterns.apply(name).as_ref()),
            None => {
                debug!("Leaving non UTF-8 name untouched: {}", entry.path.display());
                current.clone()
            }
        };

        if !targets.insert(target.clone()) {
            return Err(Error::Conflict { path: target });
        }
        if target != current {
            plan.renames.push(Rename {
                kind: entry.kind,
                from: current,
                to: target.clone(),
            });
        }
        if entry.kind == EntryKind::File {
            plan.files.push(target.clone());
        }
        plan.mapping.insert(entry.path.clone(), target);
    }

    Ok(plan)
}

impl RenamePlan {
    /// Renames in execution order.
    pub fn renames(&self) -> &[Rename] {
        &self.renames
    }

    /// Post-rename paths of every scanned file, in scan order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Looks up the post-rename path of a scanned entry.
    pub fn resolve<P: AsRef<Path>>(&self, old: P) -> Option<&Path> {
        self.mapping.get(old.as_ref()).map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// Performs the planned renames below `root`.
    ///
    /// Stops at the first failure; renames already done are kept.
    ///
    /// # Errors
    /// * `Error::Conflict` if a target already exists on disk
    /// * `Error::RenameFailure` if the operating system refuses a rename
    pub fn execute<P: AsRef<Path>>(&self, root: P) -> Result<usize> {
        let root = root.as_ref();
        for rename in &self.renames {
            let from = root.join(&rename.from);
            let to = root.join(&rename.to);
            if fs::symlink_metadata(&to).is_ok() {
                return Err(Error::Conflict { path: to });
            }

            debug!("Renaming '{}' to '{}'", from.display(), to.display());
            fs::rename(&from, &to).map_err(|source| Error::RenameFailure {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
        }
        Ok(self.renames.len())
    }
}
