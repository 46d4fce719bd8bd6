//! Terminal driver: schedules polls of a [`TailReader`](crate::tail::TailReader).
//!
//! Two disciplines share one loop: a fixed-interval timer (what the desktop
//! window did) and filesystem notifications backed by that same timer as a
//! fallback (what the terminal watcher did).

mod driver;
mod watcher;

pub use driver::{Driver, DriverOptions};
pub use watcher::{FileWatcher, watch_dir};
