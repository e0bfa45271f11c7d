use std::str::FromStr;

use thiserror::Error;

use super::Operator;

/// Error returned for a key name with no calculator binding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseActionError {
    #[error("empty key name")]
    Empty,

    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

/// One calculator input, as produced by a button press or a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `'0'..='9'` or `'.'`.
    Digit(char),
    Operator(Operator),
    Evaluate,
    Clear,
    ToggleSign,
    Percent,
    Backspace,
}

impl Action {
    /// Maps a key name to its action.
    ///
    /// Single characters map directly (`7`, `.`, `+`, `%`, `=`). Word keys
    /// are case-insensitive: `Enter`, `Escape`/`Esc`/`C`/`clear`,
    /// `Backspace`, `sign` or `+/-`, `percent`, `equals`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pocket_core::{Action, Operator};
    ///
    /// assert_eq!(Action::from_key("7"), Ok(Action::Digit('7')));
    /// assert_eq!(Action::from_key("*"), Ok(Action::Operator(Operator::Mul)));
    /// assert_eq!(Action::from_key("Enter"), Ok(Action::Evaluate));
    /// assert!(Action::from_key("F5").is_err());
    /// ```
    pub fn from_key(key: &str) -> Result<Self, ParseActionError> {
        let key = key.trim();
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (None, _) => return Err(ParseActionError::Empty),
            (Some(c), None) => {
                if c.is_ascii_digit() || c == '.' {
                    return Ok(Self::Digit(c));
                }
                if let Some(op) = Operator::from_char(c) {
                    return Ok(Self::Operator(op));
                }
                match c {
                    '=' => return Ok(Self::Evaluate),
                    '%' => return Ok(Self::Percent),
                    'c' | 'C' => return Ok(Self::Clear),
                    _ => {}
                }
            }
            _ => {}
        }

        match key.to_ascii_lowercase().as_str() {
            "enter" | "return" | "equals" => Ok(Self::Evaluate),
            "escape" | "esc" | "clear" => Ok(Self::Clear),
            "backspace" | "bksp" => Ok(Self::Backspace),
            "sign" | "+/-" | "negate" => Ok(Self::ToggleSign),
            "percent" => Ok(Self::Percent),
            _ => Err(ParseActionError::UnknownKey(key.to_string())),
        }
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}
