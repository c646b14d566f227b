pub(crate) mod config;
pub(crate) mod generate;
pub(crate) mod inspect;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use memorial_core::{DistributionSummary, SourceFormat};
use memorial_import::{ExtractOptions, Extraction, extract};

use crate::cli_types::SourceArgs;
use crate::error::CliError;
use crate::settings::GenerateSettings;

/// Resolve the format flag, falling back to the file extension.
pub(crate) fn resolve_format(args: &SourceArgs) -> Result<SourceFormat, CliError> {
    match args.format {
        Some(format) => Ok(format),
        None => SourceFormat::from_path(&args.source)
            .ok_or_else(|| CliError::UnknownFormat(args.source.clone())),
    }
}

/// Read the source described by `args`, with settings as fallbacks.
pub(crate) fn read_source(
    args: &SourceArgs,
    settings: &GenerateSettings,
) -> Result<Extraction, CliError> {
    let format = resolve_format(args)?;
    let mut options = ExtractOptions::new(format).policy(args.policy.unwrap_or(settings.policy));
    if let Some(rows) = args.header_rows {
        options = options.header_rows(rows);
    }

    log::info!(
        "Reading {} ({})",
        args.source
            .display()
            .if_supports_color(Stderr, |t| t.cyan()),
        format,
    );
    let extraction = extract(&args.source, &options)?;

    let defects = extraction.defects().count();
    log::info!(
        "{} items parsed{}",
        extraction
            .records
            .len()
            .if_supports_color(Stderr, |t| t.bold()),
        if defects > 0 {
            format!(
                ", {}",
                format!("{defects} rows skipped").if_supports_color(Stderr, |t| t.yellow())
            )
        } else {
            String::new()
        },
    );
    Ok(extraction)
}

/// Print the per-model distribution, one model per line.
pub(crate) fn print_distribution(summary: &DistributionSummary) {
    if summary.is_empty() {
        log::warn!("No items found");
        return;
    }
    log::info!("");
    log::info!("{}", "Distribution by model:".if_supports_color(Stderr, |t| t.bold()));
    for (model, count) in summary.iter() {
        log::info!(
            "  - {}: {} items",
            model.if_supports_color(Stderr, |t| t.cyan()),
            count
        );
    }
}
