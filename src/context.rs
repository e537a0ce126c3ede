//! Shared theme context: the prelude injected into every compile.
//!
//! The three theme definition files (variables, base mixins, customization
//! mixins) are read once and held in a [`ThemeContext`]. Compile operations
//! take the context by reference, so a compile cannot run against an
//! unloaded prelude. Watch mode replaces the context wholesale through a
//! [`ContextHandle`] when a theme file changes; in-flight compiles keep the
//! snapshot they started with.

use crate::config::MotifConfig;
use crate::log;
use arc_swap::ArcSwap;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;

/// Theme context loading errors
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("error while reading theme file `{0}`")]
    Read(PathBuf, #[source] std::io::Error),
}

// ============================================================================
// ThemeContext
// ============================================================================

/// The shared definition blobs prepended to every compiled stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeContext {
    pub variables: String,
    pub mixins: String,
    pub customization_mixins: String,
}

impl ThemeContext {
    /// Read the three theme files and construct the context.
    ///
    /// All three reads run in parallel and all three must succeed; a
    /// failed read yields no context at all, never a partial one.
    pub fn load(config: &MotifConfig) -> Result<Self, ContextError> {
        let [variables_path, mixins_path, custom_path] = config.theme.prelude_paths();

        let ((variables, mixins), customization_mixins) = rayon::join(
            || {
                rayon::join(
                    || read_theme_file(&variables_path),
                    || read_theme_file(&mixins_path),
                )
            },
            || read_theme_file(&custom_path),
        );

        Ok(Self {
            variables: variables?,
            mixins: mixins?,
            customization_mixins: customization_mixins?,
        })
    }

    /// Build the compile input for a source: prelude first, then the source.
    ///
    /// Order matters: variables come before the mixins that reference them,
    /// and customization mixins come after the base set so their
    /// definitions win at include time.
    pub fn inject(&self, source: &str) -> String {
        let blocks = [&self.variables, &self.mixins, &self.customization_mixins];

        let mut input = String::with_capacity(self.prelude_len() + source.len() + 3);
        for block in blocks {
            input.push_str(block);
            if !block.is_empty() && !block.ends_with('\n') {
                input.push('\n');
            }
        }
        input.push_str(source);
        input
    }

    /// Combined byte length of the three prelude blobs.
    pub fn prelude_len(&self) -> usize {
        self.variables.len() + self.mixins.len() + self.customization_mixins.len()
    }
}

fn read_theme_file(path: &Path) -> Result<String, ContextError> {
    fs::read_to_string(path).map_err(|err| ContextError::Read(path.to_path_buf(), err))
}

// ============================================================================
// ContextHandle
// ============================================================================

/// Swappable handle to the current theme context.
///
/// Watch mode reloads the prelude when a theme file changes; the swap is a
/// single atomic pointer store, so readers always observe either the old
/// context or the new one, never a mix of the two.
pub struct ContextHandle {
    inner: ArcSwap<ThemeContext>,
}

impl ContextHandle {
    pub fn new(context: ThemeContext) -> Self {
        Self {
            inner: ArcSwap::from_pointee(context),
        }
    }

    /// Snapshot of the current context.
    pub fn current(&self) -> Arc<ThemeContext> {
        self.inner.load_full()
    }

    /// Replace the context wholesale.
    pub fn replace(&self, context: ThemeContext) {
        self.inner.store(Arc::new(context));
    }

    /// Reload the prelude from disk, keeping the prior context on failure.
    ///
    /// Failures are reported through the log sink only; watch mode must not
    /// die because a theme file was mid-save or briefly missing.
    pub fn reload_or_report(&self, config: &MotifConfig) -> bool {
        match ThemeContext::load(config) {
            Ok(context) => {
                self.replace(context);
                true
            }
            Err(err) => {
                log!("error"; "error while reading theme files, unable to compile stylesheets");
                log!("error"; "{err}");
                if let Some(source) = std::error::Error::source(&err) {
                    log!("error"; "{source}");
                }
                false
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Build a config whose theme directory points into `dir`, with the
    /// three prelude files written out.
    fn theme_fixture(dir: &TempDir, variables: &str, mixins: &str, custom: &str) -> MotifConfig {
        let theme_dir = dir.path().join("themes/cotton");
        fs::create_dir_all(theme_dir.join("ontology")).unwrap();
        fs::write(theme_dir.join("ontology/variables.scss"), variables).unwrap();
        fs::write(theme_dir.join("mixins.scss"), mixins).unwrap();
        fs::write(theme_dir.join("ontology/customization-mixins.scss"), custom).unwrap();

        let mut config = MotifConfig::default();
        config.theme.dir = theme_dir;
        config.build.sources = dir.path().to_path_buf();
        config
    }

    #[test]
    fn test_load_populates_all_three_blobs() {
        let dir = TempDir::new().unwrap();
        let config = theme_fixture(
            &dir,
            "$brand-color: #336699;\n",
            "@mixin rounded { border-radius: 4px; }\n",
            "@mixin rounded { border-radius: 8px; }\n",
        );

        let context = ThemeContext::load(&config).unwrap();
        assert!(context.variables.contains("$brand-color"));
        assert!(context.mixins.contains("4px"));
        assert!(context.customization_mixins.contains("8px"));
    }

    #[test]
    fn test_load_missing_file_names_it() {
        let dir = TempDir::new().unwrap();
        let config = theme_fixture(&dir, "", "", "");
        fs::remove_file(config.theme.mixins_path()).unwrap();

        let err = ThemeContext::load(&config).unwrap_err();
        assert!(format!("{err}").contains("mixins.scss"));
    }

    #[test]
    fn test_inject_orders_prelude_before_source() {
        let context = ThemeContext {
            variables: "$a: 1;".into(),
            mixins: "@mixin m {}".into(),
            customization_mixins: "@mixin m { color: red; }".into(),
        };

        let input = context.inject(".x { @include m; }");
        let variables_at = input.find("$a: 1;").unwrap();
        let mixins_at = input.find("@mixin m {}").unwrap();
        let custom_at = input.find("@mixin m { color: red; }").unwrap();
        let source_at = input.find(".x {").unwrap();

        assert!(variables_at < mixins_at);
        assert!(mixins_at < custom_at);
        assert!(custom_at < source_at);
    }

    #[test]
    fn test_inject_separates_blocks_with_newlines() {
        let context = ThemeContext {
            variables: "$a: 1;".into(),
            mixins: "$b: 2;".into(),
            customization_mixins: String::new(),
        };

        // Blocks without trailing newlines must not run together
        let input = context.inject("$c: 3;");
        assert!(input.contains("$a: 1;\n$b: 2;\n$c: 3;"));
    }

    #[test]
    fn test_handle_keeps_prior_context_on_failed_reload() {
        let dir = TempDir::new().unwrap();
        let config = theme_fixture(&dir, "$old: 1;\n", "", "");

        let handle = ContextHandle::new(ThemeContext::load(&config).unwrap());
        fs::remove_file(config.theme.variables_path()).unwrap();

        assert!(!handle.reload_or_report(&config));
        assert_eq!(handle.current().variables, "$old: 1;\n");
    }

    #[test]
    fn test_handle_replacement_is_wholesale() {
        let dir = TempDir::new().unwrap();
        let config = theme_fixture(&dir, "$v: old;\n", "$m: old;\n", "$c: old;\n");
        let handle = ContextHandle::new(ThemeContext::load(&config).unwrap());

        fs::write(config.theme.variables_path(), "$v: new;\n").unwrap();
        fs::write(config.theme.mixins_path(), "$m: new;\n").unwrap();
        fs::write(config.theme.customization_mixins_path(), "$c: new;\n").unwrap();

        assert!(handle.reload_or_report(&config));
        let context = handle.current();
        assert_eq!(context.variables, "$v: new;\n");
        assert_eq!(context.mixins, "$m: new;\n");
        assert_eq!(context.customization_mixins, "$c: new;\n");
    }
}
