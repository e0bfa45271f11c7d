use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of a single binary operation.
///
/// The calculator never returns these to its caller; [`Calculator::evaluate`]
/// turns them into the latched error state.
///
/// [`Calculator::evaluate`]: super::Calculator::evaluate
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CalcError {
    /// The divisor was exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The result left the range of finite doubles.
    #[error("result out of range")]
    Overflow,
}

/// Error returned when a key is not one of the four operators.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown operator '{0}'")]
pub struct ParseOperatorError(pub String);

/// The four binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn all() -> &'static [Operator] {
        &[Operator::Add, Operator::Sub, Operator::Mul, Operator::Div]
    }

    /// Keyboard character for the operator.
    pub fn key(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Typographic symbol used in the expression line.
    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '\u{2212}',
            Self::Mul => '\u{00d7}',
            Self::Div => '\u{00f7}',
        }
    }

    /// Accepts either the keyboard character or the display symbol.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' | '\u{2212}' => Some(Self::Sub),
            '*' | 'x' | '\u{00d7}' => Some(Self::Mul),
            '/' | '\u{00f7}' => Some(Self::Div),
            _ => None,
        }
    }

    /// Applies the operator in IEEE-754 double arithmetic.
    ///
    /// # Errors
    ///
    /// - [`CalcError::DivisionByZero`] when dividing by exactly zero
    /// - [`CalcError::Overflow`] when the result is not finite
    ///
    /// # Examples
    ///
    /// ```
    /// use pocket_core::{CalcError, Operator};
    ///
    /// assert_eq!(Operator::Sub.apply(5.0, 8.0), Ok(-3.0));
    /// assert_eq!(Operator::Div.apply(5.0, 0.0), Err(CalcError::DivisionByZero));
    /// ```
    pub fn apply(
        &self,
        lhs: f64,
        rhs: f64,
    ) -> Result<f64, CalcError> {
        let result = match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                lhs / rhs
            }
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::Overflow)
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or_else(|| ParseOperatorError(s.to_string())),
            _ => Err(ParseOperatorError(s.to_string())),
        }
    }
}
