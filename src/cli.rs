//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::config::CssStyle;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Motif theme stylesheet compiler CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (theme and sources are resolved against it)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: motif.toml)
    #[arg(short = 'C', long, default_value = "motif.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile stylesheets once and exit
    Build {
        /// Source files to compile (defaults to every stylesheet under the sources directory)
        paths: Vec<PathBuf>,

        /// CSS output style
        #[arg(short, long, value_enum)]
        style: Option<CssStyle>,

        /// Maximum number of parallel compiles (0 = one per core)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Compile everything, then recompile on change
    Watch {
        /// Debounce window for change events, in milliseconds
        #[arg(long)]
        debounce: Option<u64>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_watch(&self) -> bool {
        matches!(self.command, Commands::Watch { .. })
    }
}
