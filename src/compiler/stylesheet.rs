//! Single stylesheet compilation: read, inject the theme prelude,
//! compile, write the sibling css file.

use crate::config::MotifConfig;
use crate::context::ThemeContext;
use crate::log;
use std::error::Error as _;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Suffix of compilable stylesheet sources.
pub const SOURCE_EXTENSION: &str = "scss";
/// Suffix of emitted output files.
pub const OUTPUT_EXTENSION: &str = "css";

/// Per-stage compile pipeline errors.
///
/// One variant per failure category; each carries the offending path and
/// (where there is one) the underlying error. Nothing here is fatal to the
/// process and nothing is retried.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("`{0}` is missing the .{SOURCE_EXTENSION} suffix")]
    NotStylesheet(PathBuf),

    #[error("error while reading stylesheet `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("error while compiling stylesheet `{0}`")]
    Compile(PathBuf, #[source] Box<grass::Error>),

    #[error("error while writing css file `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}

/// Derive the output path by swapping the terminal `.scss` for `.css`.
///
/// Returns `None` for paths without the source suffix; compiling such a
/// path would derive an output path equal to its input, so the pipeline
/// rejects it up front instead.
pub fn output_path(source: &Path) -> Option<PathBuf> {
    match source.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext == SOURCE_EXTENSION => Some(source.with_extension(OUTPUT_EXTENSION)),
        _ => None,
    }
}

/// Compile one stylesheet source to its sibling css file.
///
/// The theme prelude is prepended to the source text and the result is
/// handed to grass; mismatched-unit arithmetic is a compile error under
/// Sass semantics, never a coercion. The output file is overwritten
/// unconditionally on success. Returns the output path.
pub fn compile_stylesheet(
    path: &Path,
    context: &ThemeContext,
    config: &MotifConfig,
) -> Result<PathBuf, CompileError> {
    let output =
        output_path(path).ok_or_else(|| CompileError::NotStylesheet(path.to_path_buf()))?;

    let source =
        fs::read_to_string(path).map_err(|err| CompileError::Read(path.to_path_buf(), err))?;

    let input = context.inject(&source);
    let options = grass::Options::default().style(config.build.style.to_grass());
    let css = grass::from_string(input, &options)
        .map_err(|err| CompileError::Compile(path.to_path_buf(), err))?;

    fs::write(&output, &css).map_err(|err| CompileError::Write(output.clone(), err))?;

    Ok(output)
}

/// Logging adapter over [`compile_stylesheet`] for fire-and-forget callers.
///
/// Watch mode must not die because one source is broken: the failure is
/// reported through the log sink with its category message and underlying
/// error, and the caller only learns success or failure.
pub fn compile_and_report(path: &Path, context: &ThemeContext, config: &MotifConfig) -> bool {
    match compile_stylesheet(path, context, config) {
        Ok(_) => true,
        Err(err) => {
            log!("error"; "{err}");
            if let Some(source) = err.source() {
                log!("error"; "{source}");
            }
            false
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
