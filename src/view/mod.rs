//! UI-agnostic view models.
//!
//! [`detail::DetailView`] is the formatted content of the detail panel and
//! [`dialog::DetailDialog`] the dialog state around it. The TUI (or the
//! plain-text printer) maps them to concrete output.

pub mod detail;
pub mod dialog;

pub use detail::{ColumnHeader, DetailView, PX_PER_COL, RecordView, fit, px_to_cols};
pub use dialog::{DetailDialog, DialogHost, RowNameLabel};
