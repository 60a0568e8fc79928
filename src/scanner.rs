//! Read-only traversal of the project tree.

use crate::constants::CHECKOUT_MARKER;
use crate::error::{Error, Result};
use crate::ignore::Exclusions;
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Kind of a scanned filesystem object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

/// One directory or file found under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Path relative to the scanned root
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    pub fn directory<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into(), kind: EntryKind::Directory }
    }

    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into(), kind: EntryKind::File }
    }
}

/// Result of a tree scan.
///
/// `dirs` is in pre-order, so a directory always precedes its children.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Scan {
    pub dirs: Vec<Entry>,
    pub files: Vec<Entry>,
}

impl Scan {
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }
}

fn is_excluded_entry(root: &Path, entry: &DirEntry, exclusions: &Exclusions) -> bool {
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    let excluded = match entry.file_name().to_str() {
        Some(name) => exclusions.is_excluded(name, relative),
        None => false,
    };
    if excluded {
        debug!("Skipping excluded entry: {}", relative.display());
    }
    excluded
}

/// Checks that `root` is a template checkout before anything is scanned.
///
/// # Errors
/// * `Error::ScanFailure` if `root` has no `.git` entry and `force` is false
pub fn ensure_template_root<P: AsRef<Path>>(root: P, force: bool) -> Result<()> {
    let root = root.as_ref();
    if force || root.join(CHECKOUT_MARKER).exists() {
        return Ok(());
    }
    Err(Error::ScanFailure {
        path: root.to_path_buf(),
        reason: format!(
            "not a template checkout (no {} found), use --force to configure it anyway",
            CHECKOUT_MARKER
        ),
    })
}

/// Walks `root` depth-first and collects every directory and regular file.
///
/// The root itself is not part of the result. Siblings are visited in file
/// name order. Excluded entries are pruned together with their subtree.
/// Symbolic links are neither followed nor collected.
///
/// # Errors
/// * `Error::ScanFailure` if the root or any directory below it cannot be
///   read; no partial result is returned
pub fn scan_tree<P: AsRef<Path>>(root: P, exclusions: &Exclusions) -> Result<Scan> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(Error::ScanFailure {
            path: root.to_path_buf(),
            reason: "not a readable directory".to_string(),
        });
    }

    let mut scan = Scan::default();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded_entry(root, entry, exclusions));

    for dir_entry in walker {
        let dir_entry = dir_entry.map_err(|e| Error::ScanFailure {
            path: e.path().unwrap_or(root).to_path_buf(),
            reason: e.to_string(),
        })?;
        let relative = dir_entry
            .path()
            .strip_prefix(root)
            .map_err(|e| Error::ScanFailure {
                path: dir_entry.path().to_path_buf(),
                reason: e.to_string(),
            })?
            .to_path_buf();

        let file_type = dir_entry.file_type();
        if file_type.is_dir() {
            debug!("Found directory: {}", relative.display());
            scan.dirs.push(Entry::directory(relative));
        } else if file_type.is_file() {
            debug!("Found file: {}", relative.display());
            scan.files.push(Entry::file(relative));
        } else {
            debug!("Skipping non-regular entry: {}", relative.display());
        }
    }

    Ok(scan)
}
