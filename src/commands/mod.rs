//! CLI commands

pub mod feed;
pub mod render;
