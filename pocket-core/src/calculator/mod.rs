//! Four-function calculator driven one keystroke at a time.
//!
//! The [`Calculator`] state machine owns the operands and the pending
//! operator. A [`Session`] pairs it with a [`DisplayAdapter`] and pushes a
//! [`Snapshot`] after every [`Action`].

mod action;
pub mod format;
mod operator;
mod session;
mod state;
mod value;

pub use action::{Action, ParseActionError};
pub use operator::{CalcError, Operator, ParseOperatorError};
pub use session::{DisplayAdapter, Session, Snapshot};
pub use state::Calculator;
pub use value::{ERROR_TEXT, MAX_ENTRY_DIGITS, Operand, ParseOperandError, Value};
