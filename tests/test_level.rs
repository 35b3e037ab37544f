use std::fs;

use tempfile::TempDir;
use wonkey_kong::entities::Position;
use wonkey_kong::level::{level_file_name, load_level, FormatError, LevelError, MAX_LEVELS};

const LEVEL_ONE: &str = include_str!("../levels/level01.txt");

fn levels_dir(files: &[(u32, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (index, text) in files {
        fs::write(dir.path().join(level_file_name(*index)), text).unwrap();
    }
    dir
}

#[test]
fn loads_a_level_by_index() {
    let dir = levels_dir(&[(1, LEVEL_ONE)]);
    let map = load_level(dir.path(), 1).unwrap();
    assert_eq!(map.player_start(), Position::new(1, 1));
}

#[test]
fn missing_level_means_no_more_levels() {
    let dir = levels_dir(&[(1, LEVEL_ONE)]);
    let err = load_level(dir.path(), 2).unwrap_err();
    assert!(matches!(err, LevelError::NotFound { .. }));
    assert!(err.to_string().contains("level02.txt"));
}

#[test]
fn index_past_the_last_level_is_not_found() {
    let dir = levels_dir(&[(MAX_LEVELS + 1, LEVEL_ONE)]);
    let err = load_level(dir.path(), MAX_LEVELS + 1).unwrap_err();
    assert!(matches!(err, LevelError::NotFound { .. }));
}

#[test]
fn bad_glyph_is_malformed() {
    let broken = LEVEL_ONE.replacen('k', "?", 1);
    let dir = levels_dir(&[(1, broken.as_str())]);
    let err = load_level(dir.path(), 1).unwrap_err();
    match err {
        LevelError::Malformed { source, .. } => {
            assert!(matches!(source, FormatError::UnknownGlyph { glyph: '?', .. }))
        }
        other => panic!("expected malformed, got {other:?}"),
    }
}

#[test]
fn truncated_file_is_malformed() {
    let truncated: String = LEVEL_ONE.lines().take(12).collect::<Vec<_>>().join("\n");
    let dir = levels_dir(&[(1, truncated.as_str())]);
    let err = load_level(dir.path(), 1).unwrap_err();
    assert!(matches!(
        err,
        LevelError::Malformed {
            source: FormatError::RowCount { found: 12, .. },
            ..
        }
    ));
}

#[test]
fn two_players_are_malformed() {
    let doubled = LEVEL_ONE.replacen("  ##H", "@ ##H", 1);
    let dir = levels_dir(&[(1, doubled.as_str())]);
    let err = load_level(dir.path(), 1).unwrap_err();
    assert!(matches!(
        err,
        LevelError::Malformed {
            source: FormatError::PlayerStarts(2),
            ..
        }
    ));
}

#[test]
fn unreadable_entry_is_malformed_not_missing() {
    let dir = levels_dir(&[]);
    fs::create_dir(dir.path().join(level_file_name(1))).unwrap();
    let err = load_level(dir.path(), 1).unwrap_err();
    assert!(matches!(
        err,
        LevelError::Malformed {
            source: FormatError::Unreadable(_),
            ..
        }
    ));
}

#[test]
fn shipped_levels_parse() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("levels");
    let mut index = 1;
    while let Ok(map) = load_level(&dir, index) {
        assert!(map.player_start().in_bounds());
        index += 1;
    }
    assert!(index > 2, "expected at least two shipped levels");
    assert!(matches!(
        load_level(&dir, index),
        Err(LevelError::NotFound { .. })
    ));
}
