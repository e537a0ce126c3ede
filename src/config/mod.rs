//! Configuration management for `motif.toml`.
//!
//! # Sections
//!
//! | Section   | Purpose                                         |
//! |-----------|-------------------------------------------------|
//! | `[theme]` | Shared theme definition files (the prelude)     |
//! | `[build]` | Source discovery, output style, worker pool     |
//! | `[watch]` | Change-event debouncing                         |
//!
//! # Example
//!
//! ```toml
//! [theme]
//! dir = "default-aspect/themes/cotton"
//!
//! [build]
//! sources = "default-aspect"
//! style = "expanded"
//!
//! [watch]
//! debounce_ms = 300
//! ```

mod build;
pub mod defaults;
mod error;
mod theme;
mod watch;

// Re-export public types used by other modules
pub use build::CssStyle;

// Internal imports used in this module
use build::BuildConfig;
use error::ConfigError;
use theme::ThemeConfig;
use watch::WatchConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing motif.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct MotifConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Theme definition files
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchConfig,
}

impl MotifConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: MotifConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Get CLI arguments reference
    pub fn get_cli(&self) -> &'static Cli {
        self.cli.unwrap()
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        self.set_root(&root);
        self.update_path_with_root(&root);

        match &cli.command {
            Commands::Build { style, jobs, .. } => {
                Self::update_option(&mut self.build.style, style.as_ref());
                Self::update_option(&mut self.build.jobs, jobs.as_ref());
            }
            Commands::Watch { debounce } => {
                Self::update_option(&mut self.watch.debounce_ms, debounce.as_ref());
            }
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let cli = self.get_cli();

        // Normalize root to absolute path
        let root = Self::normalize_path(root);
        self.set_root(&root);

        // Normalize config path
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        // Normalize source and theme directories
        self.build.sources = Self::normalize_path(&root.join(&self.build.sources));
        self.theme.dir = Self::normalize_path(&root.join(&self.theme.dir));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if !self.build.sources.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[build.sources] not found: {}",
                self.build.sources.display()
            )));
        }

        if !self.theme.dir.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[theme.dir] not found: {}",
                self.theme.dir.display()
            )));
        }

        if self.watch.debounce_ms == 0 {
            bail!(ConfigError::Validation(
                "[watch.debounce_ms] must be at least 1".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
