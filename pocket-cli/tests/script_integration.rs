//! Integration tests that run the key-script fixtures end-to-end.
//!
//! These complement the unit tests inside script.rs (which all use inline
//! string literals) by going through the read-from-disk path and the
//! calculator session together.

use std::path::PathBuf;

use pocket_cli::{DisplayOptions, app, script};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run_fixture(name: &str) -> (pocket_core::Snapshot, String) {
    let actions = script::load_from_file(&fixture(name)).expect("fixture should load");
    let mut out = Vec::new();
    let snapshot = app::run_actions(&actions, DisplayOptions::default(), &mut out)
        .expect("fixture should run");
    (snapshot, String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn chained_fixture_evaluates_left_to_right() {
    let (snapshot, printed) = run_fixture("chained.keys");

    assert_eq!(snapshot.display_value, "20");
    assert_eq!(snapshot.expression, "5 \u{00d7} 4 =");
    assert_eq!(printed, "20\n5 \u{00d7} 4 =\n");
}

#[test]
fn divide_by_zero_fixture_stays_latched() {
    let (snapshot, printed) = run_fixture("divide_by_zero.keys");

    assert!(snapshot.is_error);
    assert_eq!(printed, "Error\n");
}

#[test]
fn recover_fixture_clears_and_continues() {
    let (snapshot, _) = run_fixture("recover.keys");

    assert!(!snapshot.is_error);
    assert_eq!(snapshot.display_value, "-50");
    assert_eq!(snapshot.expression, "-12.5 \u{00d7} 4 =");
}

#[test]
fn bad_key_fixture_reports_line() {
    let err = script::load_from_file(&fixture("bad_key.keys")).unwrap_err();

    assert_eq!(err.to_string(), "line 2: unknown key 'Tab'");
}

#[test]
fn trace_option_prints_every_frame_of_fixture() {
    let actions = script::load_from_file(&fixture("chained.keys")).unwrap();
    let mut out = Vec::new();
    let options = DisplayOptions {
        color: false,
        trace: true,
    };

    app::run_actions(&actions, options, &mut out).unwrap();

    let printed = String::from_utf8(out).unwrap();
    // initial frame plus one per key
    assert_eq!(printed.lines().filter(|l| !l.contains(' ')).count(), 1 + 6);
}
