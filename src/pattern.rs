//! Substitution patterns and validation of the values fed into them.

use crate::constants::{
    EXEC_TOKEN, PROJECT_ID_MAX, PROJECT_ID_MIN, PROJECT_NAME_TOKEN, PROJID_TOKEN,
};
use crate::error::{Error, Result};
use rand::Rng;
use regex::{Captures, Regex};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Six digit number used to keep include guards and namespaces unique
/// across generated projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectId(u32);

impl ProjectId {
    /// Wraps an explicit id, rejecting values outside the six digit range.
    pub fn new(value: u32) -> Result<Self> {
        if (PROJECT_ID_MIN..=PROJECT_ID_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidInput(format!(
                "project id {} is outside {}..={}",
                value, PROJECT_ID_MIN, PROJECT_ID_MAX
            )))
        }
    }

    /// Picks a random id in the accepted range.
    pub fn generate() -> Self {
        Self(rand::rng().random_range(PROJECT_ID_MIN..=PROJECT_ID_MAX))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|e| Error::InvalidInput(format!("project id '{}': {}", s, e)))?;
        Self::new(value)
    }
}

/// The three values a run is configured with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectInputs {
    pub project_id: ProjectId,
    pub project_name: String,
    pub exec_name: String,
}

fn is_path_special(value: &str) -> bool {
    value == "." || value == ".." || value.contains('/') || value.contains('\\')
}

/// Rejects project names that would break token syntax or produce
/// unusable paths.
///
/// # Errors
/// * `Error::InvalidInput` if the name is empty, contains a space, `<`, `>`
///   or a path separator, or is `.` / `..`
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidInput("project name must not be empty".to_string()));
    }
    if name.contains([' ', '<', '>']) {
        return Err(Error::InvalidInput(format!(
            "forbidden project name '{}': spaces, '<' and '>' are not allowed",
            name
        )));
    }
    if is_path_special(name) {
        return Err(Error::InvalidInput(format!(
            "forbidden project name '{}': must be a single path component",
            name
        )));
    }
    Ok(())
}

/// Rejects executable names that cannot be used as a single path component.
pub fn validate_exec_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidInput("executable name must not be empty".to_string()));
    }
    if is_path_special(name) {
        return Err(Error::InvalidInput(format!(
            "forbidden executable name '{}': must be a single path component",
            name
        )));
    }
    Ok(())
}

/// One literal token and the value it is replaced with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub token: String,
    pub replacement: String,
}

impl Pattern {
    pub fn new<T: Into<String>, R: Into<String>>(token: T, replacement: R) -> Self {
        Self { token: token.into(), replacement: replacement.into() }
    }
}

/// Ordered, immutable set of patterns applied to names and file contents.
///
/// Substitution is a single left-to-right pass: every non-overlapping token
/// occurrence is replaced, the earlier declared pattern wins when two tokens
/// start at the same position, and inserted text is never scanned again.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
    matcher: Option<Regex>,
}

impl PatternSet {
    pub fn new(patterns: Vec<Pattern>) -> Result<Self> {
        if patterns.iter().any(|p| p.token.is_empty()) {
            return Err(Error::InvalidInput("pattern tokens must not be empty".to_string()));
        }

        let matcher = if patterns.is_empty() {
            None
        } else {
            // Alternation is leftmost-first, which gives declaration order
            // precedence between tokens starting at the same offset.
            let alternation = patterns
                .iter()
                .map(|p| regex::escape(&p.token))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&alternation).map_err(|e| Error::InvalidInput(e.to_string()))?)
        };

        Ok(Self { patterns, matcher })
    }

    /// Validates the inputs and builds the
    /// `[__PROJID__, <PROJECT_NAME>, <EXEC>]` pattern set.
    pub fn from_inputs(inputs: &ProjectInputs) -> Result<Self> {
        validate_project_name(&inputs.project_name)?;
        validate_exec_name(&inputs.exec_name)?;

        Self::new(vec![
            Pattern::new(PROJID_TOKEN, inputs.project_id.to_string()),
            Pattern::new(PROJECT_NAME_TOKEN, inputs.project_name.as_str()),
            Pattern::new(EXEC_TOKEN, inputs.exec_name.as_str()),
        ])
    }

    /// Replaces every token occurrence in `text`.
    ///
    /// Text without tokens is returned borrowed and unchanged.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match &self.matcher {
            Some(matcher) => matcher.replace_all(text, |caps: &Captures<'_>| {
                self.replacement_for(&caps[0]).to_string()
            }),
            None => Cow::Borrowed(text),
        }
    }

    fn replacement_for<'a>(&'a self, token: &'a str) -> &'a str {
        self.patterns
            .iter()
            .find(|p| p.token == token)
            .map(|p| p.replacement.as_str())
            .unwrap_or(token)
    }
}
