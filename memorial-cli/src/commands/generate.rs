use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use memorial_migration::{
    MigrationOptions, default_migration_name, insert_statement_count, render_migration,
    write_migration,
};

use crate::cli_types::GenerateArgs;
use crate::commands::{print_distribution, read_source};
use crate::error::CliError;
use crate::settings::GenerateSettings;

/// Build render options from flags, falling back to settings.
pub(crate) fn migration_options(
    args: &GenerateArgs,
    settings: &GenerateSettings,
) -> Result<MigrationOptions, CliError> {
    let mut options = MigrationOptions::new()
        .include_distribution(settings.include_distribution && !args.no_distribution)
        .generated_on(Local::now().date_naive());

    if let Some(name) = args.source.source.file_name() {
        options = options.source_label(name.to_string_lossy());
    }

    options = match args.batch_size {
        Some(0) => return Err(CliError::config("--batch-size must be at least 1")),
        Some(size) => options.batch_size(size),
        None if args.single_statement || settings.single_statement => options.single_statement(),
        None => options.batch_size(settings.batch_size),
    };
    Ok(options)
}

/// Output path: `--output`, or a timestamped file in the settings' output dir.
fn output_path(args: &GenerateArgs, settings: &GenerateSettings) -> PathBuf {
    args.output.clone().unwrap_or_else(|| {
        settings
            .output_dir
            .join(default_migration_name(Local::now().naive_local()))
    })
}

/// Extract, render and write a migration.
pub(crate) fn run_generate(args: &GenerateArgs, settings: &GenerateSettings) -> Result<(), CliError> {
    let options = migration_options(args, settings)?;
    let extraction = read_source(&args.source, settings)?;
    print_distribution(&extraction.distribution());

    let script = render_migration(&extraction.records, &options);

    if args.dry_run {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(script.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    let path = output_path(args, settings);
    write_migration(&path, &script)?;

    let statements = insert_statement_count(extraction.records.len(), options.batch_size);
    log::info!("");
    log::info!(
        "{} {}",
        "Migration written:".if_supports_color(Stderr, |t| t.green()),
        path.display()
    );
    log::info!(
        "  {} items in {} INSERT statement(s)",
        extraction.records.len(),
        statements
    );
    Ok(())
}
