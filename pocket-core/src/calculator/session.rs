use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Action, Calculator, ParseActionError};

/// What a display needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Formatted main register, or the error text.
    pub display_value: String,
    /// Trace of the operation in progress; empty when there is none.
    pub expression: String,
    /// Set while the calculator is latched in its error state.
    pub is_error: bool,
}

/// Renders calculator snapshots. Adapters never see the calculator itself.
pub trait DisplayAdapter {
    fn render(
        &mut self,
        snapshot: &Snapshot,
    );
}

impl DisplayAdapter for Vec<Snapshot> {
    fn render(
        &mut self,
        snapshot: &Snapshot,
    ) {
        self.push(snapshot.clone());
    }
}

impl<D: DisplayAdapter + ?Sized> DisplayAdapter for &mut D {
    fn render(
        &mut self,
        snapshot: &Snapshot,
    ) {
        (**self).render(snapshot);
    }
}

/// A calculator wired to a display.
///
/// The display receives the initial snapshot on construction and a fresh one
/// after every dispatched action.
#[derive(Debug)]
pub struct Session<D> {
    calculator: Calculator,
    display: D,
}

impl<D: DisplayAdapter> Session<D> {
    pub fn new(display: D) -> Self {
        Self::with_calculator(Calculator::new(), display)
    }

    pub fn with_calculator(
        calculator: Calculator,
        mut display: D,
    ) -> Self {
        display.render(&calculator.snapshot());
        Self {
            calculator,
            display,
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Runs one action and pushes the resulting snapshot.
    pub fn dispatch(
        &mut self,
        action: Action,
    ) {
        debug!(?action, "dispatch");
        self.calculator.apply(action);
        self.display.render(&self.calculator.snapshot());
    }

    /// Parses and dispatches each key in order.
    ///
    /// Stops at the first key with no binding; keys before it have already
    /// been applied. Returns the number of keys dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`ParseActionError`] for an empty or unknown key name.
    pub fn run_keys<I, S>(
        &mut self,
        keys: I,
    ) -> Result<usize, ParseActionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dispatched = 0;
        for key in keys {
            let action = Action::from_key(key.as_ref())?;
            self.dispatch(action);
            dispatched += 1;
        }
        Ok(dispatched)
    }
}
