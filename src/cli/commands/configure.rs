//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Confirm, CustomType, Select, Text};
use std::path::PathBuf;

use crate::config::{ConfigFile, ConfigManager, DEFAULT_INTERVAL_MS, SkylogConfig};
use crate::paths::normalize_user_path;
use crate::translation::Catalog;
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command.
///
/// With `show`, prints the current configuration. Otherwise lets the user
/// interactively set the default log file, catalog, interval, and watch mode.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new()?;

    if show {
        let config = manager.load_if_exists()?;
        print_current_defaults(&manager, &config);
        return Ok(());
    }

    handle_prompt_cancellation(|| run_configure_inner(&manager))?;
    Ok(())
}

fn run_configure_inner(manager: &ConfigManager) -> Result<()> {
    let mut config = manager.load_if_exists()?;

    print_current_defaults(manager, &config);

    let log_file = input_log_file(config.skylog.log_file.as_ref())?;
    let catalog = select_catalog(config.skylog.catalog)?;
    let interval_ms = input_interval(config.skylog.interval_ms)?;
    let watch = Confirm::new("Use filesystem notifications?")
        .with_default(config.skylog.watch.unwrap_or(true))
        .with_help_message("Polling at the interval above always runs as a fallback")
        .prompt()?;

    config.skylog = SkylogConfig {
        log_file,
        catalog: Some(catalog),
        interval_ms: Some(interval_ms),
        watch: Some(watch),
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display().to_string())
    );

    Ok(())
}

fn print_current_defaults(manager: &ConfigManager, config: &ConfigFile) {
    let not_set = || Style::secondary("(not set)");

    println!(
        "{} {}",
        Style::header("Current defaults"),
        Style::secondary(manager.config_path().display())
    );
    println!(
        "  {}     {}",
        Style::label("log_file"),
        config
            .skylog
            .log_file
            .as_ref()
            .map_or_else(not_set, |p| Style::value(p.display()))
    );
    println!(
        "  {}      {}",
        Style::label("catalog"),
        config
            .skylog
            .catalog
            .map_or_else(not_set, Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("interval_ms"),
        config
            .skylog
            .interval_ms
            .map_or_else(not_set, Style::value)
    );
    println!(
        "  {}        {}",
        Style::label("watch"),
        config.skylog.watch.map_or_else(not_set, Style::value)
    );
    if !config.patterns.is_empty() {
        println!(
            "  {}     {}",
            Style::label("patterns"),
            Style::value(config.patterns.len())
        );
    }
    println!();
}

fn input_log_file(current: Option<&PathBuf>) -> Result<Option<PathBuf>> {
    let current = current.map(|p| p.display().to_string());
    let mut prompt = Text::new("Default log file:")
        .with_help_message("Leave empty to be asked on every start");

    if let Some(ref d) = current {
        prompt = prompt.with_default(d);
    }

    let answer = prompt.prompt()?;
    if answer.trim().is_empty() {
        return Ok(None);
    }

    let path = normalize_user_path(&answer)?;
    if path.is_dir() {
        bail!("{} is a directory, not a log file", path.display());
    }
    if !path.exists() {
        println!(
            "{}",
            Style::hint("File does not exist yet; it will be waited for when watching")
        );
    }
    Ok(Some(path))
}

fn select_catalog(default: Option<Catalog>) -> Result<Catalog> {
    let options: Vec<String> = Catalog::ALL
        .iter()
        .map(|c| format!("{} - {}", c.name(), c.description()))
        .collect();

    let default = default.unwrap_or_default();
    let default_index = Catalog::ALL
        .iter()
        .position(|c| *c == default)
        .unwrap_or(0);

    let selection = Select::new("Default catalog:", options)
        .with_starting_cursor(default_index)
        .raw_prompt()?;

    Ok(Catalog::ALL
        .get(selection.index)
        .copied()
        .unwrap_or_default())
}

fn input_interval(default: Option<u64>) -> Result<u64> {
    let value = CustomType::<u64>::new("Poll interval (ms):")
        .with_default(default.unwrap_or(DEFAULT_INTERVAL_MS))
        .with_error_message("Please enter a whole number of milliseconds")
        .prompt()?;

    if value == 0 {
        bail!("Poll interval must be greater than zero");
    }
    Ok(value)
}
