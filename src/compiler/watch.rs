//! Incremental recompile helpers for watch mode.
//!
//! This module provides the **compilation logic** for processing file
//! changes, called by the event loop in [`crate::watch`].
//!
//! # Rebuild strategy
//!
//! | Changed path                    | Action                                 |
//! |---------------------------------|----------------------------------------|
//! | anything under the theme dir    | reload prelude, recompile every source |
//! | a `.scss` under the sources dir | recompile just that file               |
//! | anything else                   | ignored                                |
//!
//! There is no dependency tracking between sources; the only dependency
//! edge is theme-to-everything.

use super::{collect_sources, compile_batch, is_compilable, normalize_path};
use crate::config::MotifConfig;
use crate::context::ContextHandle;
use crate::log;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};

/// Role of a changed file in the rebuild strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    /// Theme definition file - the prelude must be reloaded and every
    /// source recompiled against it.
    Theme,
    /// Standalone stylesheet source - recompiled individually.
    Source,
    /// File outside the watched tree, or not a stylesheet.
    Unknown,
}

/// Categorize a changed path to determine how it should be handled.
pub fn categorize_path(path: &Path, config: &MotifConfig) -> FileCategory {
    let path = normalize_path(path);

    if path.starts_with(&config.theme.dir) {
        FileCategory::Theme
    } else if path.starts_with(&config.build.sources) && is_compilable(&path) {
        FileCategory::Source
    } else {
        FileCategory::Unknown
    }
}

/// Process a debounced batch of file changes.
///
/// Returns `(compiled, failed)` counts. A theme change reloads the
/// prelude through the handle and widens the batch to every discovered
/// source; if the reload fails the prior prelude stays in place and the
/// explicitly changed sources still compile against it.
pub fn process_changes(
    paths: &[PathBuf],
    handle: &ContextHandle,
    config: &MotifConfig,
) -> (usize, usize) {
    let mut theme_changed = false;
    let mut changed: FxHashSet<PathBuf> = FxHashSet::default();

    for path in paths {
        match categorize_path(path, config) {
            FileCategory::Theme => theme_changed = true,
            FileCategory::Source => {
                changed.insert(normalize_path(path));
            }
            FileCategory::Unknown => {}
        }
    }

    let mut sources: Vec<PathBuf> = changed.into_iter().collect();

    if theme_changed && handle.reload_or_report(config) {
        sources = collect_sources(config);
        log!("theme"; "theme changed, recompiling {} stylesheets", sources.len());
    }

    if sources.is_empty() {
        return (0, 0);
    }

    let context = handle.current();
    match compile_batch(&sources, &context, config) {
        Ok(failed) => (sources.len() - failed, failed),
        Err(err) => {
            log!("error"; "{err}");
            (0, sources.len())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
