//! End-to-end calculator scenarios driven through a [`Session`], the way a
//! keyboard front end drives it.

use pocket_core::{Action, Calculator, Operator, Session, Snapshot};
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("pocket_core=trace")
        .try_init();
}

fn run(keys: &str) -> Session<Vec<Snapshot>> {
    init_tracing();
    let mut session = Session::new(Vec::new());
    session
        .run_keys(keys.split_whitespace())
        .expect("scenario keys are all bound");
    session
}

fn last(session: &Session<Vec<Snapshot>>) -> Snapshot {
    session.display().last().cloned().unwrap_or_default()
}

#[test]
fn simple_addition_shows_result_and_trace() {
    let session = run("5 + 3 =");

    let shown = last(&session);
    assert_eq!(shown.display_value, "8");
    assert_eq!(shown.expression, "5 + 3 =");
    assert!(!shown.is_error);
}

#[test]
fn digit_cap_accepts_first_twelve_ones() {
    let session = run("1 1 1 1 1 1 1 1 1 1 1 1 1 =");

    let entered = session.calculator().current().as_operand().map(|op| op.as_str().to_string());
    assert_eq!(entered.as_deref(), Some("111111111111"));
    // the display itself rounds to ten significant digits
    assert_eq!(last(&session).display_value, "111111111100");
    let frames = session.display();
    // the thirteenth press left the display unchanged
    assert_eq!(frames[12], frames[13]);
}

#[test]
fn chained_operators_apply_left_to_right() {
    let session = run("2 + 3 * 4 =");

    assert_eq!(last(&session).display_value, "20");
}

#[test]
fn division_by_zero_blocks_input_until_clear() {
    let mut session = run("5 / 0 =");
    assert!(last(&session).is_error);

    session
        .run_keys(["9", "+", "2", "=", "sign", "%", "."])
        .unwrap();
    let shown = last(&session);
    assert_eq!(shown.display_value, "Error");
    assert!(shown.is_error);

    session.dispatch(Action::Clear);
    session.run_keys(["4", "-", "6", "="]).unwrap();

    let shown = last(&session);
    assert_eq!(shown.display_value, "-2");
    assert_eq!(shown.expression, "4 \u{2212} 6 =");
    assert!(!shown.is_error);
}

#[test]
fn typed_sequences_parse_to_literal_values() {
    for typed in ["7", "42", "3.14159", "0.5", "100200300", "999999999999"] {
        let mut calc = Calculator::new();
        for key in typed.chars() {
            calc.digit(key);
        }

        let entered = calc.current().as_operand().map(|op| op.to_f64());
        let expected: f64 = typed.parse().unwrap();
        assert_eq!(entered, Some(expected), "typing {typed}");
    }
}

#[test]
fn repeated_equals_keeps_result() {
    let session = run("6 * 7 = = =");

    let frames = session.display();
    let results: Vec<_> = frames[4..]
        .iter()
        .map(|s| s.display_value.as_str())
        .collect();
    assert_eq!(results, vec!["42", "42", "42"]);
}

#[test]
fn large_product_switches_to_exponent_display() {
    let session = run("2 0 0 0 0 0 0 * 5 0 0 0 0 0 0 =");

    assert_eq!(last(&session).display_value, "1.0000e+13");
}

#[test]
fn exponent_display_rounds_midpoint_up() {
    let session = run("1 0 0 0 0 5 * 1 0 0 0 0 0 0 0 =");

    assert_eq!(last(&session).display_value, "1.0001e+12");
}

#[test]
fn division_result_is_rounded_for_display() {
    let session = run("1 0 / 3 =");

    let shown = last(&session);
    assert_eq!(shown.display_value, "3.333333333");
    assert_eq!(shown.expression, "10 \u{00f7} 3 =");
}

#[test]
fn sign_and_percent_compose() {
    let session = run("2 5 sign %");

    assert_eq!(last(&session).display_value, "-0.25");
}

#[test]
fn operator_sequence_tracks_pending_operator() {
    let mut session = run("8");
    for op in Operator::all() {
        session.dispatch(Action::Operator(*op));
        assert_eq!(session.calculator().operator(), Some(*op));
    }
    session.run_keys(["2", "Enter"]).unwrap();

    assert_eq!(last(&session).display_value, "4");
}
