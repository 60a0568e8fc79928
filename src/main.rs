//! projinit's main application entry point.
//! Handles command-line argument parsing, input collection and reporting.

use projinit::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    ignore::Exclusions,
    logger::init_logger,
    pattern::PatternSet,
    processor::{Processor, Summary},
    prompt::{collect_inputs, DialoguerPrompter},
    scanner::ensure_template_root,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(err) => default_error_handler(err),
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Checks the root is a template checkout
/// 2. Collects the project inputs from arguments or prompts
/// 3. Validates them and builds the pattern set
/// 4. Loads exclusion rules for the root
/// 5. Renames tokenized paths and rewrites file contents
/// 6. Prints the summary
///
/// Returns the process exit code: 1 if any file could not be rewritten.
fn run(args: Args) -> Result<i32> {
    ensure_template_root(&args.dir, args.force)?;

    let prompt = DialoguerPrompter::new();
    let inputs = collect_inputs(&prompt, args.project_name, args.exec_name, args.num)?;
    let patterns = PatternSet::from_inputs(&inputs)?;
    let exclusions = Exclusions::for_root(&args.dir, &args.exclude)?;

    let processor = Processor::new(&args.dir, &patterns, &exclusions, args.dry_run);
    let outcome = processor.run()?;

    let summary = Summary::new(&inputs, &outcome, args.dry_run);
    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(std::io::Error::from)?;
        println!("{}", json);
    } else {
        let action = if args.dry_run { "Would rename" } else { "Renamed" };
        for rename in &outcome.renames {
            println!("{}: '{}' -> '{}'", action, rename.from.display(), rename.to.display());
        }
        println!("{}", summary);
    }

    Ok(if outcome.content.has_failures() { 1 } else { 0 })
}
