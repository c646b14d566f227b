//! memorial-okean CLI
//!
//! Turns boat item sheets into SQL migrations for the `memorial_okean` table.

mod cli_types;
mod commands;
mod error;
mod logging;
mod settings;

use clap::Parser;

use crate::cli_types::{Cli, Commands, ConfigAction};
use crate::error::CliError;
use crate::settings::Settings;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings_path = cli.config.unwrap_or_else(settings::settings_path);

    match cli.command {
        Commands::Generate(args) => {
            let settings = Settings::load(&settings_path)?;
            commands::generate::run_generate(&args, &settings.generate)
        }
        Commands::Inspect(args) => {
            let settings = Settings::load(&settings_path)?;
            commands::inspect::run_inspect(&args, &settings.generate)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings_path),
            ConfigAction::Path => {
                commands::config::run_config_path(&settings_path);
                Ok(())
            }
        },
    }
}
