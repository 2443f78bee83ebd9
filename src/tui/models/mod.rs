//! Row models for TUI tables.

mod group_row;

pub use group_row::GroupRow;
