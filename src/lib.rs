//! # skylog - Localized Log Watcher
//!
//! `skylog` follows the Sky client log as it grows and prints a Chinese
//! message for the newest recognized event line.
//!
//! ## Features
//!
//! - **Incremental tailing**: Only bytes appended since the last read are consumed
//! - **Pattern catalogs**: Ordered regex tables with fixed, computed, or templated output
//! - **Custom patterns**: Extend the catalog from the config file
//! - **Notifications**: Filesystem events with interval polling as a fallback
//!
//! ## Quick Start
//!
//! ```bash
//! # Watch a log file
//! skylog ~/Sky/Sky.log
//!
//! # Use the window wording and a slower interval
//! skylog -c window -i 250 ~/Sky/Sky.log
//!
//! # Translate single lines
//! skylog translate "Players updated: 12 total, 3 in level"
//!
//! # List the active patterns
//! skylog patterns
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/skylog/config.toml`:
//!
//! ```toml
//! [skylog]
//! log_file = "/games/sky/Sky.log"
//! catalog = "console"
//! interval_ms = 10
//! watch = true
//!
//! [[patterns]]
//! key = "level_loaded"
//! pattern = 'Level (\w+) loaded'
//! template = "已加载关卡 {1}"
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and resolution.
pub mod config;

/// Diagnostic logging via `tracing`.
pub mod logging;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities.
pub mod paths;

/// Change notification and the polling loop.
pub mod shell;

/// Incremental log reading.
pub mod tail;

/// Pattern tables and line translation.
pub mod translation;

/// Terminal UI components (spinner, colors, prompts).
pub mod ui;
