#![allow(clippy::unwrap_used)]
//! Tail reader contract tests.
//!
//! These exercise the reader against real files the way the game client
//! writes them: appended in bursts, sometimes deleted or rotated.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use skylog::tail::{TailCursor, TailReader};
use skylog::translation::{Catalog, LineTranslator};
use tempfile::TempDir;

fn console_reader(path: &Path) -> TailReader {
    TailReader::new(path, LineTranslator::new(Catalog::Console.table().unwrap()))
}

fn append(path: &Path, text: &str) {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    file.write_all(text.as_bytes()).unwrap();
}

#[test]
fn test_first_append_after_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Sky.log");
    fs::write(&path, "").unwrap();
    let mut reader = console_reader(&path);

    assert!(reader.poll().unwrap().is_none());

    append(&path, "Synced!\n");
    let record = reader.poll().unwrap().unwrap();

    assert_eq!(record.text, "同步完成！");
    assert_eq!(reader.cursor().offset(), 8);
}

#[test]
fn test_batch_translates_only_last_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Sky.log");
    let mut reader = console_reader(&path);

    append(
        &path,
        "Synced!\nResync friends.\nPlayers updated: 7 total, 2 in level\n",
    );
    let record = reader.poll().unwrap().unwrap();

    assert_eq!(record.text, "玩家更新：共[7]人，当前房间内[2]人");
}

#[test]
fn test_unmatched_last_line_hides_earlier_match() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Sky.log");
    let mut reader = console_reader(&path);

    append(&path, "Synced!\nframe 120 rendered\n");

    assert!(reader.poll().unwrap().is_none());
    assert_eq!(
        reader.cursor().offset(),
        fs::metadata(&path).unwrap().len()
    );
}

#[test]
fn test_polling_without_growth_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Sky.log");
    append(&path, "Synced!\n");
    let mut reader = console_reader(&path);

    assert!(reader.poll().unwrap().is_some());
    let cursor = reader.cursor();

    for _ in 0..3 {
        assert!(reader.poll().unwrap().is_none());
        assert_eq!(reader.cursor(), cursor);
    }
}

#[test]
fn test_resumed_cursor_reads_only_new_bytes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Sky.log");
    append(&path, "Synced!\nQueuing move: [1.1.1.1:1]\n");
    let offset = fs::metadata(&path).unwrap().len();

    append(&path, "Connecting to server: [2.2.2.2:2]\n");
    let mut reader = TailReader::with_cursor(
        &path,
        LineTranslator::new(Catalog::Console.table().unwrap()),
        TailCursor::new(offset),
    );

    assert_eq!(
        reader.read_new_lines().unwrap(),
        vec!["Connecting to server: [2.2.2.2:2]".to_string()]
    );
}

#[test]
fn test_deleted_file_keeps_cursor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Sky.log");
    append(&path, "Synced!\n");
    let mut reader = console_reader(&path);
    reader.poll().unwrap();
    let cursor = reader.cursor();

    fs::remove_file(&path).unwrap();
    let err = reader.poll().unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(reader.cursor(), cursor);

    append(&path, "Synced!");
    // Recreated file is shorter than the old cursor, so it is read from the start.
    assert_eq!(reader.poll().unwrap().unwrap().text, "同步完成！");
}

#[test]
fn test_line_without_newline_is_translated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Sky.log");
    let mut reader = console_reader(&path);

    append(&path, "Resync friends.count: 42");

    assert_eq!(
        reader.poll().unwrap().unwrap().text,
        "重新同步好友数量：42"
    );
}

#[test]
fn test_line_split_across_writes_is_read_as_two_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Sky.log");
    let mut reader = console_reader(&path);

    append(&path, "Resync friends.");
    assert_eq!(reader.poll().unwrap().unwrap().text, "重新同步好友。");

    // The rest of the line no longer matches the count pattern.
    append(&path, "count: 7\n");
    assert!(reader.poll().unwrap().is_none());
}
