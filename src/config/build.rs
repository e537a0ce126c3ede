//! `[build]` section configuration.
//!
//! Contains build settings: source discovery root, output style, and the
//! compile worker pool size.

use super::defaults;
use clap::ValueEnum;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Enums
// ============================================================================

/// CSS output style emitted by the compiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CssStyle {
    /// Human-readable output with one declaration per line (default).
    #[default]
    Expanded,
    /// Whitespace-stripped output for production.
    Compressed,
}

impl CssStyle {
    pub const fn to_grass(self) -> grass::OutputStyle {
        match self {
            Self::Expanded => grass::OutputStyle::Expanded,
            Self::Compressed => grass::OutputStyle::Compressed,
        }
    }
}

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in motif.toml - compile pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// sources = "default-aspect"   # Directory scanned for .scss sources
/// style = "compressed"         # CSS output style
/// jobs = 4                     # Max parallel compiles (0 = one per core)
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Directory scanned for compilable stylesheets.
    #[serde(default = "defaults::build::sources")]
    #[educe(Default = defaults::build::sources())]
    pub sources: PathBuf,

    /// CSS output style.
    #[serde(default = "defaults::build::style")]
    #[educe(Default = defaults::build::style())]
    pub style: CssStyle,

    /// Maximum number of in-flight compiles. 0 means one per core.
    #[serde(default = "defaults::build::jobs")]
    #[educe(Default = defaults::build::jobs())]
    pub jobs: usize,
}

#[cfg(test)]
mod tests {
    use super::super::MotifConfig;
    use super::*;

    #[test]
    fn test_build_config_defaults() {
        let config: MotifConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.sources, PathBuf::from("default-aspect"));
        assert_eq!(config.build.style, CssStyle::Expanded);
        assert_eq!(config.build.jobs, 0);
        assert!(config.build.root.is_none());
    }

    #[test]
    fn test_build_config_custom() {
        let config = r#"
            [build]
            sources = "styles"
            style = "compressed"
            jobs = 2
        "#;
        let config: MotifConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.sources, PathBuf::from("styles"));
        assert_eq!(config.build.style, CssStyle::Compressed);
        assert_eq!(config.build.jobs, 2);
    }

    #[test]
    fn test_css_style_parsing() {
        let styles = [
            ("expanded", CssStyle::Expanded),
            ("compressed", CssStyle::Compressed),
        ];

        for (str_style, expected) in styles {
            let config = format!(
                r#"
                [build]
                style = "{str_style}"
            "#
            );
            let config: MotifConfig = toml::from_str(&config).unwrap();
            assert_eq!(config.build.style, expected, "Failed for style: {str_style}");
        }
    }

    #[test]
    fn test_build_unknown_field_rejection() {
        let config = r#"
            [build]
            unknown_field = "should_fail"
        "#;
        let result: Result<MotifConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
