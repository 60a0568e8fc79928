//! Command-line interface implementation for projinit.
//! Provides argument parsing and help text formatting using clap.

use crate::pattern::ProjectId;
use clap::{error::ErrorKind, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

const TOKENS_HELP: &str = "Tokens replaced in directory names, file names and file contents:
  <PROJECT_NAME>  the project name
  <EXEC>          the executable name
  __PROJID__      the project number, used in include guards

Run without PROJECT_NAME and EXEC_NAME to be asked for them.";

/// Command-line arguments structure for projinit.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "projinit: turns a template checkout into your project",
    long_about = None,
    after_help = TOKENS_HELP
)]
pub struct Args {
    /// The name of the project, must not contain spaces, '<' or '>'
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: Option<String>,

    /// What to call the default hello world executable
    #[arg(value_name = "EXEC_NAME")]
    pub exec_name: Option<String>,

    /// Project number between 100000 and 999999, random by default
    #[arg(short, long, value_name = "NUM")]
    pub num: Option<ProjectId>,

    /// Root of the template project to configure
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Extra glob of entries to leave alone; may be repeated
    #[arg(short = 'x', long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Configure the directory even if it is not a git checkout
    #[arg(short, long)]
    pub force: bool,

    /// Show what would change without touching any file
    #[arg(short, long)]
    pub dry_run: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// True when exactly one of the two names was given on the command line.
    pub fn is_incomplete(&self) -> bool {
        self.project_name.is_some() != self.exec_name.is_some()
    }
}

/// How a command line was understood.
#[derive(Debug)]
pub enum Invocation {
    /// Arguments are complete, run with them
    Run(Args),
    /// Positional arguments are incomplete or there are too many of them
    Usage,
    /// An argument value was rejected, e.g. an out of range `--num`
    Invalid(clap::Error),
    /// Help, version and other cases clap reports itself
    Clap(clap::Error),
}

/// Parses `itr` as a full command line, including the program name.
pub fn parse_invocation<I, T>(itr: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(itr) {
        Ok(args) if args.is_incomplete() => Invocation::Usage,
        Ok(args) => Invocation::Run(args),
        Err(e) => match e.kind() {
            ErrorKind::UnknownArgument => Invocation::Usage,
            ErrorKind::ValueValidation | ErrorKind::InvalidValue => Invocation::Invalid(e),
            _ => Invocation::Clap(e),
        },
    }
}

fn print_help_and_exit() -> ! {
    let _ = Args::command()
        .help_template(
            r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
        )
        .print_help();
    std::process::exit(0);
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 0 after printing help if the positional arguments are
///   incomplete or there are too many of them
/// * With status code 1 if an argument value is invalid
/// * With clap's default error handling for everything else
pub fn get_args() -> Args {
    match parse_invocation(std::env::args_os()) {
        Invocation::Run(args) => args,
        Invocation::Usage => print_help_and_exit(),
        Invocation::Invalid(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
        Invocation::Clap(e) => e.exit(),
    }
}
