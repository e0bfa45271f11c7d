//! The calculator's input/operator/result state machine.
//!
//! Two states matter: *entry*, where digits extend the current operand, and
//! *result*, entered after an operator or an evaluation, where the next digit
//! starts a fresh operand. A failed evaluation latches [`Value::Error`] until
//! [`Calculator::clear`].
//!
//! Operators chain eagerly from left to right: `2 + 3 * 4` computes `2 + 3`
//! when `*` is pressed and then `5 * 4`, the way a pocket calculator does,
//! not with algebraic precedence.
//!
//! Invalid input (a second decimal point, a thirteenth digit, an operator
//! while latched) is ignored without error.

use tracing::{debug, trace, warn};

use super::{
    Action, CalcError, Operand, Operator, Snapshot, Value,
    format::{RESULT_SIGNIFICANT_DIGITS, format_number, round_significant},
};

/// A four-function calculator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Calculator {
    current: Value,
    previous: Option<Operand>,
    operator: Option<Operator>,
    pending_reset: bool,
    expression: String,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Value {
        &self.current
    }

    pub fn previous(&self) -> Option<&Operand> {
        self.previous.as_ref()
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    /// `true` right after an operator or an evaluation: the next digit
    /// starts a new operand instead of extending this one.
    pub fn is_pending_reset(&self) -> bool {
        self.pending_reset
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn is_error(&self) -> bool {
        self.current.is_error()
    }

    /// Read-only view for a display.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display_value: self.current.display(),
            expression: self.expression.clone(),
            is_error: self.is_error(),
        }
    }

    /// Routes an [`Action`] to the matching transition.
    pub fn apply(
        &mut self,
        action: Action,
    ) {
        match action {
            Action::Digit(key) => self.digit(key),
            Action::Operator(op) => self.select_operator(op),
            Action::Evaluate => self.evaluate(),
            Action::Clear => self.clear(),
            Action::ToggleSign => self.toggle_sign(),
            Action::Percent => self.percent(),
            Action::Backspace => self.backspace(),
        }
    }

    /// Enters a digit or the decimal point.
    pub fn digit(
        &mut self,
        key: char,
    ) {
        if !(key.is_ascii_digit() || key == '.') {
            trace!(%key, "ignoring non-digit key");
            return;
        }
        let Value::Number(operand) = &mut self.current else {
            trace!(%key, "ignoring digit while latched");
            return;
        };

        if self.pending_reset {
            *operand = Operand::starting_with(key);
            self.pending_reset = false;
        } else if !operand.push_key(key) {
            trace!(%key, operand = %operand, "digit rejected");
        }
    }

    /// Selects the pending operator, first evaluating a pending expression
    /// if a second operand has been entered since.
    pub fn select_operator(
        &mut self,
        op: Operator,
    ) {
        if self.operator.is_some() && !self.pending_reset {
            self.evaluate();
        }
        let Value::Number(operand) = &self.current else {
            trace!(operator = %op, "ignoring operator while latched");
            return;
        };

        self.expression = format!("{} {}", format_number(operand.to_f64()), op.symbol());
        self.previous = Some(operand.clone());
        self.operator = Some(op);
        self.pending_reset = true;
        debug!(operator = ?op, expression = %self.expression, "operator selected");
    }

    /// Applies the pending operator to the previous and current operands.
    ///
    /// Does nothing without a pending operator or before a second operand
    /// is entered, so pressing equals twice is harmless.
    pub fn evaluate(&mut self) {
        if self.pending_reset {
            return;
        }
        let (Some(op), Some(previous), Value::Number(current)) =
            (self.operator, &self.previous, &self.current)
        else {
            return;
        };

        let lhs = previous.to_f64();
        let rhs = current.to_f64();
        let outcome = op
            .apply(lhs, rhs)
            .map(|result| round_significant(result, RESULT_SIGNIFICANT_DIGITS))
            .and_then(|result| Operand::from_f64(result).ok_or(CalcError::Overflow));

        match outcome {
            Ok(result) => {
                self.expression = format!(
                    "{} {} {} =",
                    format_number(lhs),
                    op.symbol(),
                    format_number(rhs)
                );
                debug!(expression = %self.expression, result = %result, "evaluated");
                self.current = Value::Number(result);
                self.operator = None;
                self.pending_reset = true;
            }
            Err(error) => self.latch(error),
        }
    }

    /// Resets every field. This is the only way out of the error state.
    pub fn clear(&mut self) {
        debug!("cleared");
        *self = Self::new();
    }

    /// Adds or removes a leading minus sign. A bare `0` is left alone.
    pub fn toggle_sign(&mut self) {
        if let Value::Number(operand) = &mut self.current
            && !operand.is_zero_literal()
        {
            operand.toggle_sign();
        }
    }

    /// Divides the current operand by one hundred.
    pub fn percent(&mut self) {
        let Value::Number(operand) = &self.current else {
            return;
        };
        // x / 100 of a finite operand is always finite
        if let Some(scaled) = Operand::from_f64(operand.to_f64() / 100.0) {
            self.current = Value::Number(scaled);
        }
    }

    /// Deletes the last typed character.
    pub fn backspace(&mut self) {
        if let Value::Number(operand) = &mut self.current {
            operand.pop_key();
        }
    }

    fn latch(
        &mut self,
        error: CalcError,
    ) {
        warn!(%error, "calculator latched in error state");
        self.current = Value::Error;
        self.previous = None;
        self.operator = None;
        self.expression.clear();
        self.pending_reset = true;
    }
}
