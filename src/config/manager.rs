use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths;
use crate::translation::{Catalog, LineTranslator, PatternTable};

/// Fallback poll interval, matching the 10 ms tick of the desktop window.
pub const DEFAULT_INTERVAL_MS: u64 = 10;

/// Default settings in the `[skylog]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkylogConfig {
    /// Path to the client log file.
    pub log_file: Option<PathBuf>,
    /// Built-in vocabulary to use.
    pub catalog: Option<Catalog>,
    /// Poll interval in milliseconds.
    pub interval_ms: Option<u64>,
    /// Use filesystem notifications in addition to interval polling.
    pub watch: Option<bool>,
}

/// A user-defined pattern, tried before the built-in catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPattern {
    /// Unique identifier shown by `skylog patterns`.
    pub key: String,
    /// Regular expression searched anywhere in the line.
    pub pattern: String,
    /// Output text with `{1}`..`{N}` capture placeholders.
    pub template: String,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/skylog/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub skylog: SkylogConfig,
    /// Custom patterns, in priority order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<CustomPattern>,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Log file path, if known. The watch command prompts when absent.
    pub log_file: Option<PathBuf>,
    pub catalog: Catalog,
    pub interval: Duration,
    pub watch: bool,
    pub patterns: Vec<CustomPattern>,
}

impl ResolvedConfig {
    /// Builds the pattern table: custom patterns first, then the catalog.
    pub fn pattern_table(&self) -> Result<PatternTable> {
        let mut builder = PatternTable::builder();
        for custom in &self.patterns {
            builder = builder.template(&custom.key, &custom.pattern, &custom.template);
        }
        self.catalog
            .append_to(builder)
            .build()
            .context("Invalid pattern in config file")
    }

    pub fn translator(&self) -> Result<LineTranslator> {
        Ok(LineTranslator::new(self.pattern_table()?))
    }

    /// Returns the poll interval for watching.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved interval is zero.
    pub fn poll_interval(&self) -> Result<Duration> {
        if self.interval.is_zero() {
            bail!(
                "Invalid poll interval: 0 ms\n\n\
                 Please provide a positive value via:\n  \
                 - CLI option: skylog --interval-ms <ms>\n  \
                 - Config file: ~/.config/skylog/config.toml"
            );
        }
        Ok(self.interval)
    }
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub log_file: Option<PathBuf>,
    pub catalog: Option<Catalog>,
    pub interval_ms: Option<u64>,
    /// `Some(false)` when `--no-watch` was passed.
    pub watch: Option<bool>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take
/// precedence over built-in defaults. A zero interval is accepted here and
/// rejected by [`ResolvedConfig::poll_interval`].
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let interval_ms = options
        .interval_ms
        .or(config_file.skylog.interval_ms)
        .unwrap_or(DEFAULT_INTERVAL_MS);

    Ok(ResolvedConfig {
        log_file: options
            .log_file
            .clone()
            .or_else(|| config_file.skylog.log_file.clone()),
        catalog: options
            .catalog
            .or(config_file.skylog.catalog)
            .unwrap_or_default(),
        interval: Duration::from_millis(interval_ms),
        watch: options.watch.or(config_file.skylog.watch).unwrap_or(true),
        patterns: config_file.patterns.clone(),
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/skylog/config.toml`
    /// or `~/.config/skylog/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })?;

        Ok(config_file)
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_if_exists(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            Ok(ConfigFile::default())
        }
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        // Same directory as the target, so the rename stays atomic.
        let temp_path = self.config_path.with_extension("toml.tmp");
        fs::write(&temp_path, contents)
            .and_then(|()| fs::rename(&temp_path, &self.config_path))
            .with_context(|| {
                format!(
                    "Failed to write config file: {}",
                    self.config_path.display()
                )
            })?;

        Ok(())
    }
}
