//! Built-in vocabularies for the Sky client log.
//!
//! All catalogs share the same matchers in the same order; they differ only
//! in wording and in whether the trailing `error` catch-all is present.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::pattern::{PatternError, PatternTable, PatternTableBuilder, Renderer};

/// Shown when the client starts logging errors; the game stops writing
/// useful lines after that point.
pub const ERROR_NOTICE: &str =
    "日志当前输出出现错误,游戏会暂停日志信息输出，请重启游戏和脚本。";

/// Selects one of the built-in vocabularies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
    /// Wording used by the terminal watcher, with the error catch-all.
    #[default]
    Console,
    /// Wording used by the desktop window, with the error catch-all.
    Window,
    /// Older desktop wording, without the error catch-all.
    Legacy,
}

impl Catalog {
    pub const ALL: [Self; 3] = [Self::Console, Self::Window, Self::Legacy];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Window => "window",
            Self::Legacy => "legacy",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Console => "terminal wording, error lines flagged",
            Self::Window => "window wording, error lines flagged",
            Self::Legacy => "older window wording, error lines ignored",
        }
    }

    /// Builds the pattern table for this catalog.
    pub fn table(self) -> Result<PatternTable, PatternError> {
        self.builder().build()
    }

    /// Returns a builder pre-loaded with this catalog, so callers can extend it.
    pub fn builder(self) -> PatternTableBuilder {
        self.append_to(PatternTable::builder())
    }

    /// Appends this catalog's entries, in priority order, to `builder`.
    pub fn append_to(self, builder: PatternTableBuilder) -> PatternTableBuilder {
        let is_legacy = self == Self::Legacy;

        let builder = builder
            .renderer(
                "friends_received",
                r"Received friends\. updated:(\d+) new:(\d+) rewrited:(\d+)",
                Renderer::Ternary(if is_legacy {
                    legacy::friends_received
                } else {
                    friends_received
                }),
            )
            .fixed(
                "authority_revoked",
                r"\[REMOTE\] Authority revoked from local because of server request",
                if is_legacy {
                    "由于服务器请求，从本地吊销了权限"
                } else {
                    "[更换房主...]由于服务器请求，从本地吊销了权限"
                },
            )
            .fixed(
                "revoke_complying",
                r"Complying with LevelServer revoke request",
                match self {
                    Self::Console => "[更换房主...]遵循LevelServer的吊销请求",
                    Self::Window => "[正在更换房主...]遵循LevelServer的吊销请求",
                    Self::Legacy => "遵循LevelServer的吊销请求",
                },
            )
            .fixed(
                "authority_synchronized",
                r"\[REMOTE\] Synchronized authority with LevelServer because of election",
                if is_legacy {
                    "REMOTE 由于选举，已将权限与[LevelServer]同步"
                } else {
                    "[更换房主成功]由于选举，已将权限与LevelServer同步"
                },
            )
            .renderer(
                "add_collectible",
                r"Add recent collectible (\d+)",
                Renderer::Unary(if is_legacy {
                    legacy::add_collectible
                } else {
                    add_collectible
                }),
            )
            .fixed("synced", r"Synced!", "同步完成！")
            .fixed(
                "achievement_stats",
                r"SetAchievementStats succeeded\.",
                if is_legacy {
                    "SetAchievementStats成功了"
                } else {
                    "重新设置统计值，成功了"
                },
            )
            .fixed(
                "remote_authority_cleared",
                r"\[REMOTE\] Cleared remote authority because of server request",
                if is_legacy {
                    "REMOTE 因服务器请求清除了远程权限"
                } else {
                    "[更换房主...]因服务器请求清除了远程权限"
                },
            )
            .fixed(
                "local_elected",
                r"\[REMOTE\] Local elected by server as authority",
                if is_legacy {
                    "REMOTE 本地被服务器选为权限(这将说明您当前为房主)"
                } else {
                    "[更换房主成功]本地被服务器选为权限(这将说明您当前为房主)"
                },
            )
            .renderer(
                "players_updated",
                r"Players updated: (\d+) total, (\d+) in level",
                Renderer::Binary(if is_legacy {
                    legacy::players_updated
                } else {
                    players_updated
                }),
            )
            .renderer(
                "resync_friends_count",
                r"Resync friends\.count: (\d+)",
                Renderer::Unary(resync_friends_count),
            )
            .renderer(
                "move",
                r"move to \[(.*?)\] with (\d+) others\.",
                Renderer::Binary(move_with_others),
            )
            .renderer(
                "queuing_move",
                r"Queuing move: \[(.*?)\]",
                Renderer::Unary(queuing_move),
            )
            .renderer(
                "connecting_server",
                r"Connecting to server: \[(.*?)\]",
                Renderer::Unary(connecting_server),
            )
            .renderer(
                "connected_server",
                r"Connected to game server: \[(.*?)\] event data: (\d+)",
                Renderer::Binary(connected_server),
            )
            .renderer(
                "player_joined",
                r"Recvd PlayerJoined: ([a-f0-9\-]+)",
                Renderer::Unary(player_joined),
            )
            .fixed("resync_friends", r"Resync friends\.", "重新同步好友。");

        if is_legacy {
            builder
        } else {
            // Must stay last: almost any failure line contains "error".
            builder.fixed("error", r"(?i)error", ERROR_NOTICE)
        }
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn friends_received(updated: &str, new: &str, rewritten: &str) -> String {
    format!("收到玩家 更新：{updated}，新增：{new}，重写：{rewritten}")
}

fn add_collectible(id: &str) -> String {
    format!("添加最近的使用表情 {id}")
}

fn players_updated(total: &str, in_level: &str) -> String {
    format!("玩家更新：共[{total}]人，当前房间内[{in_level}]人")
}

fn resync_friends_count(count: &str) -> String {
    format!("重新同步好友数量：{count}")
}

fn move_with_others(address: &str, others: &str) -> String {
    format!("和其它{others}人一起搬移到[{address}]")
}

fn queuing_move(address: &str) -> String {
    format!("排队搬移到 [{address}]")
}

fn connecting_server(address: &str) -> String {
    format!("连接到服务器: [{address}]")
}

fn connected_server(address: &str, event_data: &str) -> String {
    format!("已连接到游戏服务器: [{address}] 事件数据: {event_data}")
}

fn player_joined(uuid: &str) -> String {
    format!("接收到玩家加入：{uuid}")
}

mod legacy {
    pub fn friends_received(updated: &str, new: &str, rewritten: &str) -> String {
        format!("收到好友信息。更新：{updated}，新增：{new}，重写：{rewritten}")
    }

    pub fn add_collectible(id: &str) -> String {
        format!("添加最近的收藏品 {id}")
    }

    pub fn players_updated(total: &str, in_level: &str) -> String {
        format!("玩家更新：共[{total}]人，级别内[{in_level}]人")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_catalog_builds() {
        for catalog in Catalog::ALL {
            assert!(catalog.table().is_ok(), "{catalog} failed to build");
        }
    }

    #[test]
    fn test_catch_all_is_last() {
        for catalog in [Catalog::Console, Catalog::Window] {
            let table = catalog.table().unwrap();
            assert_eq!(table.entries().last().unwrap().key(), "error");
        }
    }

    #[test]
    fn test_legacy_has_no_catch_all() {
        let table = Catalog::Legacy.table().unwrap();
        assert!(table.get("error").is_none());
        assert_eq!(table.len(), 17);
    }

    #[test]
    fn test_catalogs_share_matchers() {
        let console = Catalog::Console.table().unwrap();
        let legacy = Catalog::Legacy.table().unwrap();
        for (a, b) in legacy.entries().iter().zip(console.entries()) {
            assert_eq!(a.key(), b.key());
            assert_eq!(a.pattern(), b.pattern());
        }
    }

    #[test]
    fn test_catalog_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            catalog: Catalog,
        }
        let parsed: Wrapper = toml::from_str("catalog = \"window\"").unwrap();
        assert_eq!(parsed.catalog, Catalog::Window);
        assert_eq!(Catalog::Legacy.to_string(), "legacy");
    }
}
