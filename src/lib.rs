//! dupdetail - Duplicate record detail view library.
//!
//! This library provides the pieces shared between:
//! - the interactive TUI viewer (`dupdetail DATASET`)
//! - the plain-text printer (`dupdetail DATASET --print`)
//!
//! Data flows from [`model`] (dataset JSON) through [`format`] (cell
//! formatting) into [`view`] (detail panel and dialog), with [`scroll`]
//! keeping row labels aligned and [`host`] owning the duplicate set.

pub mod format;
pub mod host;
pub mod model;
pub mod scroll;
pub mod tui;
pub mod util;
pub mod view;
