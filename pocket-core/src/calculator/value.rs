use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::format::{format_number, number_to_string};

/// Text shown while the calculator is latched in its error state.
pub const ERROR_TEXT: &str = "Error";

/// Maximum number of digits accepted while typing an operand.
///
/// The sign and the decimal point do not count towards the limit.
pub const MAX_ENTRY_DIGITS: usize = 12;

/// Error returned when text is not a finite decimal number.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid operand '{0}': expected a finite decimal number")]
pub struct ParseOperandError(String);

/// An operand as the user sees it.
///
/// The text is kept verbatim so partial entry such as `"0."` or `"1.50"`
/// survives until the next keystroke. It always parses as a finite `f64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Operand(String);

impl Operand {
    /// The operand shown after a clear.
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// Creates an operand from a computed value.
    ///
    /// Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then(|| Self(number_to_string(value)))
    }

    /// Starts a fresh operand from a single key: `"0."` for the decimal
    /// point, the digit itself otherwise.
    pub(crate) fn starting_with(key: char) -> Self {
        if key == '.' {
            Self("0.".to_string())
        } else {
            Self(key.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_f64(&self) -> f64 {
        self.0.parse().unwrap_or(0.0)
    }

    /// Number of decimal digits in the text.
    pub fn digit_count(&self) -> usize {
        self.0.chars().filter(char::is_ascii_digit).count()
    }

    pub fn is_zero_literal(&self) -> bool {
        self.0 == "0"
    }

    /// Extends the operand by one key. Returns `false` when the key was
    /// rejected and the operand is unchanged.
    pub(crate) fn push_key(
        &mut self,
        key: char,
    ) -> bool {
        if key == '.' && self.0.contains('.') {
            return false;
        }
        if self.is_zero_literal() && key != '.' {
            self.0 = key.to_string();
            return true;
        }
        if self.digit_count() >= MAX_ENTRY_DIGITS {
            return false;
        }

        let mut candidate = self.0.clone();
        candidate.push(key);
        if !is_finite_number(&candidate) {
            return false;
        }
        self.0 = candidate;
        true
    }

    /// Removes the last character, then anything left dangling (a bare sign
    /// or an unfinished exponent). An emptied operand becomes `"0"`.
    pub(crate) fn pop_key(&mut self) {
        self.0.pop();
        while !self.0.is_empty() && !is_finite_number(&self.0) {
            self.0.pop();
        }
        if self.0.is_empty() {
            self.0 = "0".to_string();
        }
    }

    pub(crate) fn toggle_sign(&mut self) {
        match self.0.strip_prefix('-') {
            Some(unsigned) => self.0 = unsigned.to_string(),
            None => self.0.insert(0, '-'),
        }
    }
}

impl Default for Operand {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Operand {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Operand {
    type Err = ParseOperandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if is_finite_number(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ParseOperandError(s.to_string()))
        }
    }
}

impl TryFrom<String> for Operand {
    type Error = ParseOperandError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operand> for String {
    fn from(operand: Operand) -> Self {
        operand.0
    }
}

/// Content of the calculator's main register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Number(Operand),
    /// Latched after a failed evaluation; only a clear leaves it.
    Error,
}

impl Value {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn as_operand(&self) -> Option<&Operand> {
        match self {
            Self::Number(operand) => Some(operand),
            Self::Error => None,
        }
    }

    /// Text for the display: the error text, or the formatted number.
    pub fn display(&self) -> String {
        match self {
            Self::Number(operand) => format_number(operand.to_f64()),
            Self::Error => ERROR_TEXT.to_string(),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Number(Operand::zero())
    }
}

// Rejects words f64 accepts ("inf", "NaN") along with anything non-finite.
fn is_finite_number(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        && text.parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn operand(text: &str) -> Operand {
        text.parse().expect("valid operand")
    }

    #[test]
    fn parse_accepts_partial_entry() {
        assert_eq!(operand("0.").as_str(), "0.");
        assert_eq!(operand("-1.50").as_str(), "-1.50");
        assert_eq!(operand(" 42 ").as_str(), "42");
    }

    #[test]
    fn parse_rejects_non_numbers() {
        assert!("".parse::<Operand>().is_err());
        assert!("-".parse::<Operand>().is_err());
        assert!("inf".parse::<Operand>().is_err());
        assert!("NaN".parse::<Operand>().is_err());
        assert!("1e400".parse::<Operand>().is_err());
        assert!("Error".parse::<Operand>().is_err());
    }

    #[test]
    fn from_f64_rejects_non_finite() {
        assert_eq!(Operand::from_f64(f64::INFINITY), None);
        assert_eq!(Operand::from_f64(f64::NAN), None);
        assert_eq!(Operand::from_f64(2.5), Some(operand("2.5")));
    }

    #[test]
    fn digit_count_ignores_sign_and_point() {
        assert_eq!(operand("-123.45").digit_count(), 5);
    }

    #[test]
    fn push_key_replaces_lone_zero() {
        let mut value = Operand::zero();

        assert!(value.push_key('7'));
        assert_eq!(value.as_str(), "7");
    }

    #[test]
    fn push_key_keeps_zero_before_point() {
        let mut value = Operand::zero();

        assert!(value.push_key('.'));
        assert!(value.push_key('5'));
        assert_eq!(value.as_str(), "0.5");
    }

    #[test]
    fn push_key_rejects_second_point() {
        let mut value = operand("3.1");

        assert!(!value.push_key('.'));
        assert_eq!(value.as_str(), "3.1");
    }

    #[test]
    fn push_key_stops_at_digit_limit() {
        let mut value = operand("-12345678901.2");

        assert!(!value.push_key('3'));
        assert_eq!(value.digit_count(), MAX_ENTRY_DIGITS);
    }

    #[test]
    fn push_key_rejects_point_after_exponent() {
        let mut value = operand("1e-7");

        assert!(!value.push_key('.'));
        assert_eq!(value.as_str(), "1e-7");
    }

    #[test]
    fn pop_key_resets_to_zero_when_emptied() {
        let mut value = operand("8");
        value.pop_key();
        assert_eq!(value, Operand::zero());

        let mut negative = operand("-8");
        negative.pop_key();
        assert_eq!(negative, Operand::zero());
    }

    #[test]
    fn pop_key_drops_unfinished_exponent() {
        let mut value = operand("2e-7");

        value.pop_key();

        assert_eq!(value.as_str(), "2");
    }

    #[test]
    fn toggle_sign_twice_restores_text() {
        let mut value = operand("0.50");

        value.toggle_sign();
        assert_eq!(value.as_str(), "-0.50");
        value.toggle_sign();
        assert_eq!(value.as_str(), "0.50");
    }

    #[test]
    fn value_display_uses_error_text() {
        assert_eq!(Value::Error.display(), ERROR_TEXT);
        assert_eq!(Value::Number(operand("1.50")).display(), "1.5");
        assert_eq!(Value::default().display(), "0");
    }
}
