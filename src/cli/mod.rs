// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `print` - writes exam copies and the answer key
//   2. `show`  - prints the questions read from a csv file

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PrintArgs, ShowArgs};

use crate::application::print_use_case::PrintConfig;

/// The main CLI struct; clap generates the argument parsing
/// from its fields via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "exam2docx",
    version,
    about = "Turn a csv file of questions into shuffled exam copies and answer keys."
)]
pub struct Cli {
    /// The subcommand to run (print or show)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Print(args) => run_print(args),
            Commands::Show(args)  => run_show(args),
        }
    }
}

/// Handles the `print` subcommand.
fn run_print(mut args: PrintArgs) -> Result<()> {
    use crate::application::print_use_case::PrintUseCase;

    let config = match args.config.take() {
        Some(path) => PrintConfig::load(&path)?,
        None => {
            let save_to = args.save_config.take();
            let config = PrintConfig::from(args);
            if let Some(path) = save_to {
                config.save(&path)?;
                tracing::info!("Settings saved to '{}'", path.display());
            }
            config
        }
    };

    let written = PrintUseCase::new(config).execute()?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

/// Handles the `show` subcommand.
fn run_show(args: ShowArgs) -> Result<()> {
    use crate::application::show_use_case::ShowUseCase;

    let use_case = ShowUseCase::new(args.input, args.selector, args.csv.into());
    print!("{}", use_case.execute()?);
    Ok(())
}
