//! Filesystem change notifications for the log file.
//!
//! Watches the file's parent directory (the file itself may not exist yet)
//! and forwards a wake-up for every create/modify event naming the file.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as _};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedSender;

/// Keeps the underlying watcher alive; dropping it stops notifications.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Starts watching `path`, sending `()` on `tx` whenever it changes.
    pub fn spawn(path: &Path, tx: UnboundedSender<()>) -> notify::Result<Self> {
        let dir = watch_dir(path);
        let file_name = path.file_name().map(OsStr::to_os_string);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    if is_relevant(&event, file_name.as_deref()) {
                        // A closed channel means the driver is shutting down.
                        let _ = tx.send(());
                    }
                }
                Err(e) => tracing::debug!(error = %e, "watch error"),
            }
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::debug!(dir = %dir.display(), "watching log directory");
        Ok(Self { _watcher: watcher })
    }
}

/// Directory to watch for `path`; a bare file name means the current directory.
pub fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn is_relevant(event: &Event, file_name: Option<&OsStr>) -> bool {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return false;
    }
    // Only one directory is watched, so the file name is enough.
    event
        .paths
        .iter()
        .any(|p| file_name.is_none() || p.file_name() == file_name)
}
