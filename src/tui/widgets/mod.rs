//! TUI widgets.

mod cell;
mod confirm;
mod detail;
pub mod detail_common;
mod groups;
mod header;
mod help;

pub use confirm::{render_delete_confirm, render_quit_confirm};
pub use detail::render_detail;
pub use groups::render_groups;
pub use header::render_header;
pub use help::render_help;
