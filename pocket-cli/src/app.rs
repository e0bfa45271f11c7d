//! Command runners shared by the binary and the integration tests.
//!
//! Each runner takes its input and output explicitly so it can be driven
//! from memory as easily as from a terminal.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use pocket_core::{Action, Session, Snapshot};
use tracing::{info, warn};

use crate::display::TerminalDisplay;

/// How calculator frames are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayOptions {
    /// Color error frames and dim the expression line.
    pub color: bool,
    /// Write every frame instead of only the last one.
    pub trace: bool,
}

fn new_session(options: DisplayOptions) -> Session<TerminalDisplay> {
    Session::new(TerminalDisplay::new(options.color, options.trace))
}

/// Dispatches `keys` in order, writes the resulting frame(s) and returns the
/// final snapshot.
pub fn run_keys<S, W>(
    keys: &[S],
    options: DisplayOptions,
    out: &mut W,
) -> Result<Snapshot>
where
    S: AsRef<str>,
    W: Write,
{
    let mut session = new_session(options);
    let dispatched = session
        .run_keys(keys.iter().map(|key| AsRef::<str>::as_ref(key)))
        .context("cannot run key sequence")?;
    info!(dispatched, "key sequence finished");

    session.display_mut().flush_to(out)?;
    Ok(session.display().latest().clone())
}

/// Dispatches pre-parsed actions, as loaded from a key script.
pub fn run_actions<W: Write>(
    actions: &[Action],
    options: DisplayOptions,
    out: &mut W,
) -> Result<Snapshot> {
    let mut session = new_session(options);
    for action in actions {
        session.dispatch(*action);
    }
    info!(dispatched = actions.len(), "key script finished");

    session.display_mut().flush_to(out)?;
    Ok(session.display().latest().clone())
}

/// Interactive calculator: whitespace-separated keys per line, a frame after
/// each line. `quit` or end of input stops it.
///
/// Unknown keys are reported and skipped; the rest of the line still runs.
pub fn calc_prompt<R, W>(
    input: R,
    out: &mut W,
    options: DisplayOptions,
) -> Result<Snapshot>
where
    R: BufRead,
    W: Write,
{
    let mut session = new_session(options);
    session.display_mut().flush_to(out)?;

    for line in input.lines() {
        let line = line.context("cannot read input")?;
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        for key in line.split_whitespace() {
            match Action::from_key(key) {
                Ok(action) => session.dispatch(action),
                Err(e) => {
                    warn!(key, "unbound key");
                    writeln!(out, "{e}")?;
                }
            }
        }
        session.display_mut().flush_to(out)?;
    }

    Ok(session.display().latest().clone())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn run_keys_prints_final_frame() {
        let mut out = Vec::new();

        let snapshot =
            run_keys(&["5", "+", "3", "="], DisplayOptions::default(), &mut out).unwrap();

        assert_eq!(snapshot.display_value, "8");
        assert_eq!(output(out), "8\n5 + 3 =\n");
    }

    #[test]
    fn run_keys_with_trace_prints_every_frame() {
        let mut out = Vec::new();
        let options = DisplayOptions {
            color: false,
            trace: true,
        };

        run_keys(&["4", "Backspace"], options, &mut out).unwrap();

        assert_eq!(output(out), "0\n4\n0\n");
    }

    #[test]
    fn run_keys_rejects_unknown_key() {
        let err = run_keys(&["1", "PageUp"], DisplayOptions::default(), &mut Vec::new())
            .unwrap_err();

        assert!(format!("{err:#}").contains("unknown key 'PageUp'"));
    }

    #[test]
    fn run_keys_with_no_keys_shows_zero() {
        let mut out = Vec::new();

        run_keys::<&str, _>(&[], DisplayOptions::default(), &mut out).unwrap();

        assert_eq!(output(out), "0\n");
    }

    #[test]
    fn run_actions_reports_error_state() {
        let actions = [
            Action::Digit('1'),
            Action::Operator(pocket_core::Operator::Div),
            Action::Digit('0'),
            Action::Evaluate,
        ];
        let mut out = Vec::new();

        let snapshot = run_actions(&actions, DisplayOptions::default(), &mut out).unwrap();

        assert!(snapshot.is_error);
        assert_eq!(output(out), "Error\n");
    }

    #[test]
    fn calc_prompt_prints_frame_per_line() {
        let input = "1 2\n+ 3\n=\nquit\n9\n";
        let mut out = Vec::new();

        let snapshot =
            calc_prompt(input.as_bytes(), &mut out, DisplayOptions::default()).unwrap();

        assert_eq!(snapshot.display_value, "15");
        assert_eq!(output(out), "0\n12\n3\n12 +\n15\n12 + 3 =\n");
    }

    #[test]
    fn calc_prompt_skips_unknown_keys() {
        let mut out = Vec::new();

        let snapshot =
            calc_prompt("7 what 8\n".as_bytes(), &mut out, DisplayOptions::default()).unwrap();

        assert_eq!(snapshot.display_value, "78");
        assert_eq!(output(out), "0\nunknown key 'what'\n78\n");
    }
}
