//! File system watcher for incremental recompiles.
//!
//! Monitors the theme and sources directories and recompiles on change.
//!
//! # Relationship with `compiler/watch.rs`
//!
//! - **This module** (`src/watch.rs`): event loop, debouncing, shutdown
//! - **`compiler/watch.rs`**: actual recompilation via [`process_changes`]

use crate::{
    compiler::watch::process_changes,
    config::MotifConfig,
    context::ContextHandle,
    log,
    logger::WatchStatus,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::RecvTimeoutError,
    },
    time::{Duration, Instant},
};

/// Poll interval while no events are pending; bounds Ctrl+C latency.
const IDLE_POLL_MS: u64 = 500;

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Format absolute path as relative to root for log display.
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events within a debounce window.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    window: Duration,
}

impl Debouncer {
    fn new(debounce_ms: u64) -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            window: Duration::from_millis(debounce_ms),
        }
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty() && self.last_event.is_some_and(|t| t.elapsed() >= self.window)
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_millis(IDLE_POLL_MS)
        } else {
            self.window
        }
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn setup_watchers(watcher: &mut impl Watcher, config: &MotifConfig) -> Result<()> {
    let root = config.get_root();

    watcher
        .watch(&config.build.sources, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", config.build.sources.display()))?;
    log!("watch"; "sources: {}", rel_path(&config.build.sources, root));

    // The theme dir usually lives inside the sources dir; a second watch
    // would only duplicate events.
    if !config.theme.dir.starts_with(&config.build.sources) {
        watcher
            .watch(&config.theme.dir, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", config.theme.dir.display()))?;
    }
    log!("watch"; "theme: {}", rel_path(&config.theme.dir, root));

    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
}

// =============================================================================
// Public API
// =============================================================================

/// Start the blocking file watcher with debouncing and live recompiles.
///
/// Runs until Ctrl+C. Compile and reload failures are reported through the
/// log sink and never end the loop.
pub fn watch_for_changes_blocking(handle: &ContextHandle, config: &MotifConfig) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, config)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst))
            .context("Failed to set Ctrl+C handler")?;
    }

    let mut debouncer = Debouncer::new(config.watch.debounce_ms);
    let mut status = WatchStatus::new();

    while !shutdown.load(Ordering::SeqCst) {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) => debouncer.add(event),
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                let paths = debouncer.take();
                match process_changes(&paths, handle, config) {
                    (0, 0) => {}
                    (compiled, 0) => {
                        status.success(&format!("recompiled {compiled} stylesheet(s)"));
                    }
                    (compiled, failed) => {
                        status.error(
                            &format!("{failed} failed, {compiled} recompiled"),
                            "see log above",
                        );
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            // Other cases: irrelevant events, timeout without ready batch
            _ => {}
        }
    }

    log!("watch"; "shutting down");
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn event_with(paths: Vec<PathBuf>) -> Event {
        let mut event = Event::new(EventKind::Modify(notify::event::ModifyKind::Any));
        event.paths = paths;
        event
    }

    #[test]
    fn test_is_temp_file() {
        assert!(is_temp_file(Path::new("a/button.scss.swp")));
        assert!(is_temp_file(Path::new("a/button.bak")));
        assert!(is_temp_file(Path::new("a/button.scss~")));
        assert!(is_temp_file(Path::new("a/.button.scss")));
        assert!(!is_temp_file(Path::new("a/button.scss")));
    }

    #[test]
    fn test_debouncer_batches_and_dedupes() {
        let mut debouncer = Debouncer::new(50);
        debouncer.add(event_with(vec![PathBuf::from("a.scss")]));
        debouncer.add(event_with(vec![
            PathBuf::from("a.scss"),
            PathBuf::from("b.scss"),
        ]));

        assert_eq!(debouncer.pending.len(), 2);
    }

    #[test]
    fn test_debouncer_filters_temp_files() {
        let mut debouncer = Debouncer::new(50);
        debouncer.add(event_with(vec![
            PathBuf::from("a.scss.swp"),
            PathBuf::from("a.scss"),
        ]));

        assert_eq!(debouncer.pending.len(), 1);
        assert!(debouncer.pending.contains(Path::new("a.scss")));
    }

    #[test]
    fn test_debouncer_not_ready_within_window() {
        let mut debouncer = Debouncer::new(10_000);
        debouncer.add(event_with(vec![PathBuf::from("a.scss")]));

        assert!(!debouncer.ready());
    }

    #[test]
    fn test_debouncer_ready_after_window() {
        let mut debouncer = Debouncer::new(0);
        debouncer.add(event_with(vec![PathBuf::from("a.scss")]));

        assert!(debouncer.ready());
        let taken = debouncer.take();
        assert_eq!(taken, vec![PathBuf::from("a.scss")]);
        assert!(!debouncer.ready());
    }

    #[test]
    fn test_debouncer_timeout_short_when_idle() {
        let debouncer = Debouncer::new(300);
        assert_eq!(debouncer.timeout(), Duration::from_millis(IDLE_POLL_MS));

        let mut debouncer = Debouncer::new(300);
        debouncer.add(event_with(vec![PathBuf::from("a.scss")]));
        assert_eq!(debouncer.timeout(), Duration::from_millis(300));
    }

    #[test]
    fn test_is_relevant_event_kinds() {
        assert!(is_relevant(&Event::new(EventKind::Modify(
            notify::event::ModifyKind::Any
        ))));
        assert!(is_relevant(&Event::new(EventKind::Create(
            notify::event::CreateKind::Any
        ))));
        assert!(!is_relevant(&Event::new(EventKind::Remove(
            notify::event::RemoveKind::Any
        ))));
        assert!(!is_relevant(&Event::new(EventKind::Access(
            notify::event::AccessKind::Any
        ))));
    }
}
