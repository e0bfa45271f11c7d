//! Terminal rendering of calculator snapshots.

use std::io::{self, Write};

use pocket_core::{DisplayAdapter, Snapshot};

const RED: &str = "\x1b[1;31m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Renders one snapshot: the value on the first line, the expression (when
/// there is one) on the second.
pub fn render_snapshot(
    snapshot: &Snapshot,
    color: bool,
) -> String {
    let mut out = if color && snapshot.is_error {
        format!("{RED}{}{RESET}", snapshot.display_value)
    } else {
        snapshot.display_value.clone()
    };

    if !snapshot.expression.is_empty() {
        out.push('\n');
        if color {
            out.push_str(&format!("{DIM}{}{RESET}", snapshot.expression));
        } else {
            out.push_str(&snapshot.expression);
        }
    }
    out
}

/// Display adapter for a line-oriented terminal.
///
/// Frames are collected as they arrive and written out by [`flush_to`].
/// In trace mode every frame is kept; otherwise only the latest.
///
/// [`flush_to`]: TerminalDisplay::flush_to
#[derive(Debug, Default)]
pub struct TerminalDisplay {
    color: bool,
    trace: bool,
    pending: Vec<Snapshot>,
    latest: Snapshot,
}

impl TerminalDisplay {
    pub fn new(
        color: bool,
        trace: bool,
    ) -> Self {
        Self {
            color,
            trace,
            ..Default::default()
        }
    }

    /// The most recent frame, whether or not it has been written yet.
    pub fn latest(&self) -> &Snapshot {
        &self.latest
    }

    /// Writes the collected frames and forgets them.
    pub fn flush_to<W: Write>(
        &mut self,
        out: &mut W,
    ) -> io::Result<()> {
        if self.trace {
            for snapshot in self.pending.drain(..) {
                writeln!(out, "{}", render_snapshot(&snapshot, self.color))?;
            }
        } else if !self.pending.is_empty() {
            self.pending.clear();
            writeln!(out, "{}", render_snapshot(&self.latest, self.color))?;
        }
        out.flush()
    }
}

impl DisplayAdapter for TerminalDisplay {
    fn render(
        &mut self,
        snapshot: &Snapshot,
    ) {
        self.latest = snapshot.clone();
        if self.trace || self.pending.is_empty() {
            self.pending.push(snapshot.clone());
        }
    }
}
