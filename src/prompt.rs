//! User input handling.
//! Values missing from the command line are asked for interactively through
//! a [`Prompter`], so the rest of the crate never touches the terminal.

use crate::error::{Error, Result};
use crate::pattern::{ProjectId, ProjectInputs};
use dialoguer::Input;
use log::debug;

/// Source of line-based answers.
pub trait Prompter {
    /// Shows `prompt` and returns the line the user entered.
    fn read_line(&self, prompt: &str) -> Result<String>;
}

/// Prompter backed by the terminal.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn read_line(&self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Fills in the run inputs, asking `prompter` for any name not supplied.
///
/// The project id is generated when `project_id` is `None`. Answers are
/// trimmed; validation happens when the pattern set is built.
pub fn collect_inputs(
    prompter: &dyn Prompter,
    project_name: Option<String>,
    exec_name: Option<String>,
    project_id: Option<ProjectId>,
) -> Result<ProjectInputs> {
    let project_name = match project_name {
        Some(name) => name,
        None => prompter.read_line("Project name")?.trim().to_string(),
    };
    let exec_name = match exec_name {
        Some(name) => name,
        None => prompter.read_line("Executable name")?.trim().to_string(),
    };
    let project_id = project_id.unwrap_or_else(|| {
        let id = ProjectId::generate();
        debug!("Generated project id {}", id);
        id
    });

    Ok(ProjectInputs { project_id, project_name, exec_name })
}
