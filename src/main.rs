//! Motif - a theme stylesheet compiler.
//!
//! Compiles `.scss` sources to sibling `.css` files, injecting the shared
//! theme prelude (variables, mixins, customization mixins) into every
//! compile.

mod cli;
mod compiler;
mod config;
mod context;
mod logger;
mod watch;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use compiler::{collect_sources, compile_batch, normalize_path};
use config::MotifConfig;
use context::{ContextHandle, ThemeContext};
use std::path::PathBuf;
use watch::watch_for_changes_blocking;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static MotifConfig = Box::leak(Box::new(load_config(cli)?));

    // The theme prelude is a precondition for every compile; on the CLI
    // path an unreadable prelude is a hard startup error.
    let theme = ThemeContext::load(config)
        .context("error while reading theme files, unable to compile stylesheets")?;
    let handle = ContextHandle::new(theme);

    match &cli.command {
        Commands::Build { paths, .. } => build_once(paths, &handle, config),
        Commands::Watch { .. } => {
            // Watch mode survives a broken initial build; the log sink
            // already carries the per-file reports.
            if let Err(err) = build_once(&[], &handle, config) {
                log!("error"; "{err}");
            }
            watch_for_changes_blocking(&handle, config)
        }
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is not an error: the defaults describe the
/// conventional theme layout and many projects need nothing else.
fn load_config(cli: &'static Cli) -> Result<MotifConfig> {
    let root = cli.root.as_deref().unwrap_or(std::path::Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        MotifConfig::from_path(&config_path)?
    } else {
        MotifConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Compile the given sources, or every discovered source when none are
/// given. Exits with an error when any compile failed.
fn build_once(paths: &[PathBuf], handle: &ContextHandle, config: &MotifConfig) -> Result<()> {
    let files = if paths.is_empty() {
        collect_sources(config)
    } else {
        paths.iter().map(|path| normalize_path(path)).collect()
    };

    if files.is_empty() {
        log!("build"; "no stylesheets found under {}", config.build.sources.display());
        return Ok(());
    }

    let context = handle.current();
    let failed = compile_batch(&files, &context, config)?;
    log!("build"; "compiled {} stylesheets", files.len() - failed);

    if failed > 0 {
        bail!("{failed} stylesheet(s) failed to compile");
    }
    Ok(())
}
