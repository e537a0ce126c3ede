//! `[theme]` section configuration.
//!
//! Locates the shared theme definition files injected into every compile.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[theme]` section in motif.toml - shared theme definition files.
///
/// The three files below `dir` form the prelude injected into every
/// compiled stylesheet. Defaults match the conventional layout:
///
/// ```toml
/// [theme]
/// dir = "default-aspect/themes/cotton"
/// variables = "ontology/variables.scss"
/// mixins = "mixins.scss"
/// customization_mixins = "ontology/customization-mixins.scss"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Theme root directory (relative to the project root until normalized).
    #[serde(default = "defaults::theme::dir")]
    #[educe(Default = defaults::theme::dir())]
    pub dir: PathBuf,

    /// Variable definitions, relative to `dir`.
    #[serde(default = "defaults::theme::variables")]
    #[educe(Default = defaults::theme::variables())]
    pub variables: PathBuf,

    /// Base mixin definitions, relative to `dir`.
    #[serde(default = "defaults::theme::mixins")]
    #[educe(Default = defaults::theme::mixins())]
    pub mixins: PathBuf,

    /// Customization mixins, relative to `dir`. Defined after the base
    /// set so their definitions win at include time.
    #[serde(default = "defaults::theme::customization_mixins")]
    #[educe(Default = defaults::theme::customization_mixins())]
    pub customization_mixins: PathBuf,
}

impl ThemeConfig {
    /// Absolute path of the variables file.
    pub fn variables_path(&self) -> PathBuf {
        self.dir.join(&self.variables)
    }

    /// Absolute path of the base mixins file.
    pub fn mixins_path(&self) -> PathBuf {
        self.dir.join(&self.mixins)
    }

    /// Absolute path of the customization mixins file.
    pub fn customization_mixins_path(&self) -> PathBuf {
        self.dir.join(&self.customization_mixins)
    }

    /// The three prelude files in injection order:
    /// variables, mixins, customization mixins.
    pub fn prelude_paths(&self) -> [PathBuf; 3] {
        [
            self.variables_path(),
            self.mixins_path(),
            self.customization_mixins_path(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::super::MotifConfig;
    use super::*;

    #[test]
    fn test_theme_config_defaults() {
        let config: MotifConfig = toml::from_str("").unwrap();

        assert_eq!(
            config.theme.dir,
            PathBuf::from("default-aspect/themes/cotton")
        );
        assert_eq!(
            config.theme.variables,
            PathBuf::from("ontology/variables.scss")
        );
        assert_eq!(config.theme.mixins, PathBuf::from("mixins.scss"));
        assert_eq!(
            config.theme.customization_mixins,
            PathBuf::from("ontology/customization-mixins.scss")
        );
    }

    #[test]
    fn test_prelude_paths_resolve_against_dir() {
        let config = r#"
            [theme]
            dir = "/project/theme"
            variables = "vars.scss"
            mixins = "mixins.scss"
            customization_mixins = "custom.scss"
        "#;
        let config: MotifConfig = toml::from_str(config).unwrap();

        let [variables, mixins, custom] = config.theme.prelude_paths();
        assert_eq!(variables, PathBuf::from("/project/theme/vars.scss"));
        assert_eq!(mixins, PathBuf::from("/project/theme/mixins.scss"));
        assert_eq!(custom, PathBuf::from("/project/theme/custom.scss"));
    }

    #[test]
    fn test_prelude_order_is_variables_mixins_custom() {
        let config = MotifConfig::default();
        let [first, second, third] = config.theme.prelude_paths();

        assert_eq!(first, config.theme.variables_path());
        assert_eq!(second, config.theme.mixins_path());
        assert_eq!(third, config.theme.customization_mixins_path());
    }

    #[test]
    fn test_theme_unknown_field_rejection() {
        let config = r#"
            [theme]
            unknown = "field"
        "#;
        let result: Result<MotifConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
