//! Reversible-edit history module: tagged operation records plus the two
//! LIFO stacks (undo, redo) that hold them.

pub mod operation_stack;

pub use operation_stack::{Operation, OperationStack};
