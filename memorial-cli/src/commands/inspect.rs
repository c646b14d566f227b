use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::cli_types::SourceArgs;
use crate::commands::{print_distribution, read_source};
use crate::error::CliError;
use crate::settings::GenerateSettings;

/// Parse a source file and report what a migration would contain.
pub(crate) fn run_inspect(args: &SourceArgs, settings: &GenerateSettings) -> Result<(), CliError> {
    let extraction = read_source(args, settings)?;
    print_distribution(&extraction.distribution());

    let defects: Vec<_> = extraction.defects().collect();
    if defects.is_empty() {
        return Ok(());
    }

    log::info!("");
    log::info!(
        "{}",
        format!("Skipped rows ({}):", defects.len()).if_supports_color(Stderr, |t| t.bold())
    );
    for skipped in defects {
        log::info!(
            "  {} {}",
            format!("line {:>5}:", skipped.line).if_supports_color(Stderr, |t| t.dimmed()),
            skipped.defect,
        );
    }
    Ok(())
}
