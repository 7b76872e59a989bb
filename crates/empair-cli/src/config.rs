//! Configuration loading and management.

use std::path::{Path, PathBuf};

use empair_core::ParserConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// Parser settings sit at the top level of the file (`min_year = 2000`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub parser: ParserConfig,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (EMPAIR_*)
        figment = figment.merge(Env::prefixed("EMPAIR_"));

        figment.extract()
    }

    /// Parser settings for this run.
    pub fn parser_config(&self) -> ParserConfig {
        self.parser.clone()
    }
}

/// Returns the platform-specific config directory for empair.
///
/// On Linux: `~/.config/empair`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("empair"))
}
