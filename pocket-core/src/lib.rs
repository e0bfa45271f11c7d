pub mod calculator;
pub mod todo;

pub use calculator::{
    Action, CalcError, Calculator, DisplayAdapter, Operand, Operator, Session, Snapshot, Value,
};
pub use todo::{ItemId, TodoItem, TodoList};
