//! Configuration file management and CLI/config merging.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, CustomPattern, DEFAULT_INTERVAL_MS, ResolveOptions, ResolvedConfig,
    SkylogConfig, resolve_config,
};
