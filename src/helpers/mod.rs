//! Helper functions shared by content, feed and template code

pub mod date;

pub use date::{date_iso8601, display_date, parse_date_string};
