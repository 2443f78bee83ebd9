//! Utility modules for dupdetail.

mod utc_offset;

pub use utc_offset::{OffsetParseError, parse_utc_offset};
