//! User settings: `~/.config/memorial-okean/settings.toml`.
//!
//! ```toml
//! [generate]
//! output_dir = "supabase/migrations"
//! batch_size = 500
//! single_statement = false
//! policy = "all"
//! include_distribution = true
//! ```
//!
//! Every key is optional. Command-line flags win over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use memorial_core::ValidationPolicy;
use memorial_migration::DEFAULT_BATCH_SIZE;

use crate::error::CliError;

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("memorial-okean").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub generate: GenerateSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GenerateSettings {
    /// Directory for migrations when no `--output` is given.
    pub output_dir: PathBuf,
    /// Tuples per INSERT statement.
    pub batch_size: usize,
    /// Ignore `batch_size` and emit one INSERT.
    pub single_statement: bool,
    pub policy: ValidationPolicy,
    pub include_distribution: bool,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("supabase").join("migrations"),
            batch_size: DEFAULT_BATCH_SIZE,
            single_statement: false,
            policy: ValidationPolicy::default(),
            include_distribution: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`; a missing file yields the defaults.
    pub(crate) fn load(path: &Path) -> Result<Self, CliError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(CliError::config(format!("{}: {e}", path.display()))),
        };
        let settings = Self::parse(&contents)
            .map_err(|e| CliError::config(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub(crate) fn parse(contents: &str) -> Result<Self, String> {
        let settings: Self = toml::from_str(contents).map_err(|e| e.message().to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), String> {
        if self.generate.batch_size == 0 {
            return Err("generate.batch_size must be at least 1 (use single_statement = true for one INSERT)".into());
        }
        Ok(())
    }

    /// Settings rendered as TOML for display.
    pub(crate) fn to_toml(&self) -> Result<String, CliError> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::config(format!("cannot render settings: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let s = Settings::parse("").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.generate.batch_size, 500);
        assert_eq!(s.generate.policy, ValidationPolicy::RequireAll);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let s = Settings::parse("[generate]\nbatch_size = 100\npolicy = \"model-only\"\n").unwrap();
        assert_eq!(s.generate.batch_size, 100);
        assert_eq!(s.generate.policy, ValidationPolicy::ModelOnly);
        assert!(s.generate.include_distribution);
        assert_eq!(s.generate.output_dir, PathBuf::from("supabase").join("migrations"));
    }

    #[test]
    fn policy_alias_accepted() {
        let s = Settings::parse("[generate]\npolicy = \"all\"\n").unwrap();
        assert_eq!(s.generate.policy, ValidationPolicy::RequireAll);
    }

    #[test]
    fn zero_batch_size_rejected() {
        let err = Settings::parse("[generate]\nbatch_size = 0\n").unwrap_err();
        assert!(err.contains("batch_size"));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(Settings::parse("[generate]\nbatchsize = 10\n").is_err());
        assert!(Settings::parse("[generate]\npolicy = \"sometimes\"\n").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let s = Settings::load(&tmp.path().join("settings.toml")).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn displayed_settings_parse_back() {
        let s = Settings::default();
        let rendered = s.to_toml().unwrap();
        assert!(rendered.contains("[generate]"));
        assert!(rendered.contains("batch_size = 500"));
        assert_eq!(Settings::parse(&rendered).unwrap(), s);
    }

    #[test]
    fn custom_settings_render_every_key() {
        let s = Settings::parse(
            "[generate]\nbatch_size = 50\nsingle_statement = true\npolicy = \"model-only\"\n",
        ).unwrap();
        let rendered = s.to_toml().unwrap();
        for key in ["output_dir", "batch_size", "single_statement", "policy", "include_distribution"] {
            assert!(rendered.contains(key), "missing {key} in {rendered}");
        }
        assert_eq!(Settings::parse(&rendered).unwrap(), s);
    }
}
