//! Orchestration of a configure run.
//! Combines scanning, rename planning, renaming and content rewriting.

use crate::content::{rewrite_contents, ContentReport};
use crate::error::Result;
use crate::ignore::Exclusions;
use crate::pattern::{PatternSet, ProjectInputs};
use crate::rename::{plan_renames, Rename};
use crate::scanner::{scan_tree, EntryKind};
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What a run did (or would do, for a dry run).
#[derive(Debug, Default)]
pub struct Outcome {
    pub renames: Vec<Rename>,
    pub content: ContentReport,
}

impl Outcome {
    pub fn renamed(&self, kind: EntryKind) -> usize {
        self.renames.iter().filter(|r| r.kind == kind).count()
    }
}

/// Applies a pattern set to one project tree.
pub struct Processor<'a> {
    root: PathBuf,
    patterns: &'a PatternSet,
    exclusions: &'a Exclusions,
    dry_run: bool,
}

impl<'a> Processor<'a> {
    pub fn new<P: AsRef<Path>>(
        root: P,
        patterns: &'a PatternSet,
        exclusions: &'a Exclusions,
        dry_run: bool,
    ) -> Self {
        Self { root: root.as_ref().to_path_buf(), patterns, exclusions, dry_run }
    }

    /// Runs scan, renames and content rewrites in that order.
    ///
    /// # Errors
    /// Scan, conflict and rename errors abort the run and are returned.
    /// Content failures do not; they are collected in `Outcome::content`.
    pub fn run(&self) -> Result<Outcome> {
        debug!("Scanning {}", self.root.display());
        let scan = scan_tree(&self.root, self.exclusions)?;
        debug!("Found {} directories and {} files", scan.dirs.len(), scan.files.len());

        let plan = plan_renames(&scan, self.patterns)?;

        // A dry run leaves the tree as scanned, so contents are read from the
        // original paths.
        let files: Vec<PathBuf> = if self.dry_run {
            scan.files.iter().map(|entry| entry.path.clone()).collect()
        } else {
            plan.execute(&self.root)?;
            plan.files().to_vec()
        };

        let mut content = rewrite_contents(&self.root, &files, self.patterns, self.dry_run);
        if self.dry_run {
            content.rewritten = content
                .rewritten
                .iter()
                .map(|old| plan.resolve(old).map(Path::to_path_buf).unwrap_or_else(|| old.clone()))
                .collect();
        }

        Ok(Outcome { renames: plan.renames().to_vec(), content })
    }
}

/// Printable result of a run.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    #[serde(flatten)]
    pub inputs: &'a ProjectInputs,
    pub dry_run: bool,
    pub directories_renamed: usize,
    pub files_renamed: usize,
    pub files_rewritten: usize,
    pub renames: &'a [Rename],
    pub failures: Vec<String>,
}

impl<'a> Summary<'a> {
    pub fn new(inputs: &'a ProjectInputs, outcome: &'a Outcome, dry_run: bool) -> Self {
        Self {
            inputs,
            dry_run,
            directories_renamed: outcome.renamed(EntryKind::Directory),
            files_renamed: outcome.renamed(EntryKind::File),
            files_rewritten: outcome.content.rewritten.len(),
            renames: &outcome.renames,
            failures: outcome.content.failures.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = if self.dry_run { "Would configure" } else { "Configured" };
        writeln!(
            f,
            "{} project id {} with name {}!",
            verb, self.inputs.project_id, self.inputs.project_name
        )?;
        writeln!(f, "The hello world executable is named \"{}\"", self.inputs.exec_name)?;
        write!(
            f,
            "{} directories renamed, {} files renamed, {} files rewritten",
            self.directories_renamed, self.files_renamed, self.files_rewritten
        )?;
        if !self.failures.is_empty() {
            write!(f, ", {} files failed", self.failures.len())?;
        }
        Ok(())
    }
}
