//! XDG-style path utilities for the configuration directory.
//!
//! Prefers XDG Base Directory conventions over OS-specific locations so the
//! config file lives in the same place on every platform.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Returns the configuration directory for skylog.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/skylog` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/skylog` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join("skylog")),
        _ => Ok(home_dir()?.join(".config").join("skylog")),
    }
}

/// Expands a leading `~` and strips surrounding quotes from a user-typed path.
///
/// Paths pasted from a file manager often arrive quoted.
pub fn normalize_user_path(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim().trim_matches(|c| c == '"' || c == '\'');

    if trimmed == "~" {
        return home_dir();
    }
    if let Some(rest) = trimmed
        .strip_prefix("~/")
        .or_else(|| trimmed.strip_prefix("~\\"))
    {
        return Ok(home_dir()?.join(rest));
    }

    Ok(Path::new(trimmed).to_path_buf())
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_dir_default() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        let dir = config_dir().unwrap();
        assert!(dir.ends_with(".config/skylog"));

        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CONFIG_HOME", val) };
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_xdg_override() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", "/custom/config") };

        let dir = config_dir().unwrap();
        assert_eq!(dir, PathBuf::from("/custom/config/skylog"));

        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CONFIG_HOME", val) };
        } else {
            unsafe { std::env::remove_var("XDG_CONFIG_HOME") };
        }
    }

    #[test]
    fn test_normalize_strips_quotes() {
        let path = normalize_user_path("  \"/games/sky/log.txt\"  ").unwrap();
        assert_eq!(path, PathBuf::from("/games/sky/log.txt"));
    }

    #[test]
    fn test_normalize_expands_home() {
        let path = normalize_user_path("~/sky/log.txt").unwrap();
        assert_eq!(path, dirs::home_dir().unwrap().join("sky/log.txt"));
    }
}
