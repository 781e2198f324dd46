use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for optisched.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (OPTI_* prefix)
/// 3. Config file (~/.config/optisched/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Delay between import submissions, in milliseconds.
    ///
    /// Can be set via:
    /// - ENV: OPTI_PACING_MILLIS
    /// - Config: pacing_millis = 100
    #[serde(default = "default_pacing_millis")]
    pub pacing_millis: u64,

    /// Directory exported CSV files are written to.
    ///
    /// Can be set via:
    /// - CLI: --out /path/to/file.csv
    /// - ENV: OPTI_EXPORT_DIR
    /// - Config: export_dir = "/path/to/dir"
    /// - Default: ~/.local/share/optisched/exports
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pacing_millis: default_pacing_millis(),
            export_dir: default_export_dir(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/optisched/config.toml
    /// Reads environment variables with OPTI_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("opti");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// The pacing delay as a [`Duration`].
    #[must_use]
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_millis)
    }
}

fn default_pacing_millis() -> u64 {
    100
}

/// Default export directory.
///
/// Returns: ~/.local/share/optisched/exports (or platform equivalent)
fn default_export_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("optisched")
        .join("exports")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/optisched/config.toml
/// - macOS: ~/Library/Application Support/optisched/config.toml
/// - Windows: %APPDATA%\optisched\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("optisched")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# OptiSched Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (OPTI_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Delay between import submissions, in milliseconds
#
# Can also be set via:
# - Environment: OPTI_PACING_MILLIS=100
#pacing_millis = 100

# Directory exported CSV files are written to
#
# Can also be set via:
# - CLI: optisched export --out /custom/path.csv courses.json
# - Environment: OPTI_EXPORT_DIR=/custom/exports
#
# Default: Platform-specific data directory
#export_dir = "/path/to/exports"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
