//! Subcommand implementations.

use anyhow::Result;

use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};

/// Configure command handler.
pub mod configure;

/// Pattern listing command handler.
pub mod patterns;

/// One-shot line translation command handler.
pub mod translate;

/// Log watching command handler.
pub mod watch;

/// Loads the config file and merges CLI overrides into it.
pub(crate) fn load_resolved(options: &ResolveOptions) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load_if_exists()?;
    resolve_config(options, &config_file)
}
