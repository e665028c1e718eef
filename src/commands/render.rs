//! Render a single post

use anyhow::Result;
use std::path::Path;

use crate::Wildcat;

/// Render the HTML of one post, either as it appears in a listing
/// (`including_link`) or on its own page
pub fn run(site: &Wildcat, file: &Path, permalink: &str, including_link: bool) -> Result<String> {
    let mut post = site.load_post(file, permalink)?;
    let html = post.to_html(&site.renderer, including_link)?;
    Ok(html.to_string())
}
