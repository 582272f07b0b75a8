use crate::cli::Cli;
use crate::core::error::{Error, Result};
use crate::index::{GenerateOptions, Generator, Mode};
use std::env;

/// Run the generator for the parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let root = match cli.path {
        Some(p) => p,
        None => env::current_dir()?,
    };

    let options = GenerateOptions {
        root,
        mode: if cli.full { Mode::Full } else { Mode::Compact },
        budget: cli.budget,
        deep: cli.deep,
        config: cli.config,
        quiet: cli.quiet,
    };

    let mut generator = Generator::new(options)?;
    let report = generator.run()?;

    if !cli.quiet {
        if report.truncated {
            println!(
                "Token budget reached after {} of {} files",
                report.files_indexed, report.files_walked
            );
        }
        println!(
            "Wrote {} and {} (~{} tokens) in {:.2}s",
            report.json_path.display(),
            report.markdown_path.display(),
            report.output_tokens,
            report.elapsed_ms / 1000.0
        );
    }
    Ok(())
}

/// Instruction printed when a run cannot start
pub fn fatal_hint(error: &Error) -> Option<&'static str> {
    error.is_fatal().then_some(
        "The bundled tree-sitter grammars could not be loaded. Reinstall codeindex \
         (cargo install --force codeindex) or rebuild it from source.",
    )
}
