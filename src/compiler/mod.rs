//! Stylesheet compilation pipeline.
//!
//! This module orchestrates the compile surface:
//!
//! - **stylesheet**: read → inject prelude → compile → write, for one source
//! - **watch**: change categorization and incremental recompiles
//!
//! Batch compiles run on a worker pool bounded by `[build] jobs`, so a
//! burst of change events queues work instead of spawning unbounded
//! concurrent compiles.

pub mod stylesheet;
pub mod watch;

pub use stylesheet::{CompileError, compile_and_report, compile_stylesheet};

use crate::config::MotifConfig;
use crate::context::ThemeContext;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    env,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

// ============================================================================
// Source discovery
// ============================================================================

/// Collect every compilable stylesheet under the sources directory.
///
/// Underscore-prefixed partials are skipped, as are the three theme
/// prelude files: those are injected into every compile, not compiled
/// standalone.
pub fn collect_sources(config: &MotifConfig) -> Vec<PathBuf> {
    let prelude = config.theme.prelude_paths();

    WalkDir::new(&config.build.sources)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| is_compilable(path) && !prelude.iter().any(|p| p == path))
        .collect()
}

/// Check whether a path names a standalone stylesheet source.
pub fn is_compilable(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    name.ends_with(".scss") && !name.starts_with('_')
}

// ============================================================================
// Batch compilation
// ============================================================================

/// Compile a batch of sources on a bounded worker pool.
///
/// Pool size comes from `[build] jobs` (0 = one per core). Individual
/// failures are reported through the log sink by [`compile_and_report`];
/// only the failure count is returned. Compiles are independent and carry
/// no ordering guarantee; the last write to an output path wins.
pub fn compile_batch(
    files: &[PathBuf],
    context: &ThemeContext,
    config: &MotifConfig,
) -> Result<usize> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.build.jobs)
        .build()
        .context("failed to build compile worker pool")?;

    let failed = pool.install(|| {
        files
            .par_iter()
            .filter(|path| !compile_and_report(path, context, config))
            .count()
    });

    Ok(failed)
}

// ============================================================================
// Shared utilities
// ============================================================================

/// Normalize a path to absolute form for reliable comparison.
///
/// Config paths are canonicalized at load time, so incoming paths (e.g.
/// from the file watcher) must be canonicalized before comparison.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

// ============================================================================
// Tests
// ============================================================================
