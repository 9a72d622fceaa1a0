use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for one search invocation.
///
/// Values can come from config files or the command line. Files are
/// consulted in order of precedence:
/// 1. Custom config file passed via `--config`
/// 2. Local `.fangrep.yaml` in the current directory
/// 3. Global `$HOME/.config/fangrep/config.yaml`
///
/// CLI arguments always win over file values; the merging behavior lives
/// in [`merge_with_cli`](SearchConfig::merge_with_cli).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// The search pattern (regex)
    #[serde(default)]
    pub pattern: String,

    /// File or directory to start the search from
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,

    /// Whether to descend into subdirectories
    #[serde(default)]
    pub recursive: bool,

    /// Whether to search hidden (dot-prefixed) files and directories.
    /// Has no effect on platforms without hidden-entry detection.
    #[serde(default)]
    pub include_hidden: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_root_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            root_path: default_root_path(),
            recursive: false,
            include_hidden: false,
            log_level: default_log_level(),
        }
    }
}

impl SearchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("fangrep/config.yaml")),
            // Local config
            Some(PathBuf::from(".fangrep.yaml")),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicitly named config file must exist
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli_config: SearchConfig) -> Self {
        // CLI values take precedence over config file values
        if !cli_config.pattern.is_empty() {
            self.pattern = cli_config.pattern;
        }
        if cli_config.root_path != default_root_path() {
            self.root_path = cli_config.root_path;
        }
        if cli_config.recursive {
            self.recursive = true;
        }
        if cli_config.include_hidden {
            self.include_hidden = true;
        }
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }
}
