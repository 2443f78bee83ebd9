//! Terminal User Interface for browsing duplicate groups.
//!
//! The overview lists the duplicate groups of the active table; Enter opens
//! the detail dialog with every row of the group, where rows can be compared
//! side by side and deleted.

mod app;
mod event;
mod input;
mod models;
mod render;
mod state;
mod style;
mod table;
mod widgets;

pub use app::App;
pub use state::AppState;
