use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::error::CliError;
use crate::settings::Settings;

/// Show the effective settings and the file they were read from.
pub(crate) fn run_config_show(path: &Path) -> Result<(), CliError> {
    let settings = Settings::load(path)?;

    log::info!(
        "{}",
        "memorial-okean settings".if_supports_color(Stderr, |t| t.bold())
    );
    log::info!("");
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stderr, |t| t.cyan()),
            "(exists)".if_supports_color(Stderr, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stderr, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stderr, |t| t.dimmed()),
        );
    }
    log::info!("");
    for line in settings.to_toml()?.lines() {
        log::info!("  {line}");
    }
    Ok(())
}

/// Print the settings file path on stdout, for scripts.
pub(crate) fn run_config_path(path: &Path) {
    println!("{}", path.display());
}
