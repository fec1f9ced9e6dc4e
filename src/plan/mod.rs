//! Caller-supplied output shape (the join tree) and its compilation into
//! one statement.

mod join_tree;

pub use join_tree::{CompiledQuery, JoinKind, JoinSpec, JoinTree};
