//! Interactive startup prompts.

use anyhow::{Result, bail};
use inquire::Text;
use std::path::PathBuf;

use super::Style;
use crate::paths::normalize_user_path;

/// Tells the user when to start watching.
///
/// The client only truncates its log when it reaches the main menu, so
/// starting earlier replays stale lines.
pub fn print_startup_notice() {
    crate::status!(
        "{}",
        Style::hint("游戏只有每次启动进入主菜单才会清空日志内容，请确保游戏已启动并登陆成功再启动监听")
    );
}

/// Asks for the log file path.
pub fn prompt_log_path() -> Result<PathBuf> {
    let answer = Text::new("请输入日志文件的路径到具体log文件:")
        .with_help_message("Path to the Sky client log file")
        .prompt()?;

    if answer.trim().is_empty() {
        bail!("Log file path cannot be empty");
    }

    normalize_user_path(&answer)
}
