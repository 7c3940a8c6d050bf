use chrono::{NaiveDate, NaiveDateTime};
use memento_mori::clock::{AgeSource, Clock, DEFAULT_BIRTHDATE};
use memento_mori::platform::{load_birthdate, ConfigError, LoadOutcome};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

struct PinnedClock(NaiveDateTime);

impl Clock for PinnedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

fn config_with(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn loads_birthdate_from_file() {
    let (_dir, path) = config_with(r#"{"birthdate": "1985-10-26 01:21:00"}"#);
    match load_birthdate(&path) {
        LoadOutcome::Loaded(birthdate) => assert_eq!(birthdate, at(1985, 10, 26, 1, 21, 0)),
        other => panic!("expected a birthdate, got {other:?}"),
    }
}

#[test]
fn missing_field_falls_back_to_default() {
    let (_dir, path) = config_with(r#"{"name": "nobody"}"#);
    let outcome = load_birthdate(&path);
    assert!(matches!(outcome, LoadOutcome::UseDefault(ConfigError::MissingField)));
    assert_eq!(outcome.birthdate(), DEFAULT_BIRTHDATE);
}

#[test]
fn garbage_falls_back_to_default() {
    let (_dir, path) = config_with("not json at all");
    let outcome = load_birthdate(&path);
    assert!(outcome.is_default());
    assert_eq!(outcome.birthdate(), at(2000, 1, 1, 0, 0, 0));
}

#[test]
fn reload_replaces_birthdate_for_later_reads_only() {
    let (_dir, path) = config_with(r#"{"birthdate": "2000-01-01 00:00:00"}"#);
    let clock = Arc::new(PinnedClock(at(2024, 3, 1, 12, 0, 0)));
    let mut source = AgeSource::with_clock(&path, clock);

    let before = source.current_age_string();
    assert_eq!(before, "\u{1F480} 24y 60d 12:00:00");

    fs::write(&path, r#"{"birthdate": "2000-02-29 06:30:00"}"#).unwrap();
    assert_eq!(source.current_age_string(), before);

    let outcome = source.reload();
    assert!(!outcome.is_default());
    assert_eq!(source.birthdate(), at(2000, 2, 29, 6, 30, 0));
    assert_eq!(source.current_age_string(), "\u{1F480} 24y 1d 05:30:00");
    assert_eq!(before, "\u{1F480} 24y 60d 12:00:00");
}

#[test]
fn reload_of_broken_config_reverts_to_default() {
    let (_dir, path) = config_with(r#"{"birthdate": "1999-12-31 23:59:59"}"#);
    let mut source = AgeSource::new(&path);
    assert_eq!(source.birthdate(), at(1999, 12, 31, 23, 59, 59));

    fs::write(&path, r#"{"birthdate": "yesterday"}"#).unwrap();
    let outcome = source.reload();
    assert!(matches!(
        outcome,
        LoadOutcome::UseDefault(ConfigError::InvalidTimestamp { .. })
    ));
    assert_eq!(source.birthdate(), DEFAULT_BIRTHDATE);
}
