//! JSON Feed output

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::feed::JsonFeed;
use crate::Wildcat;

/// Serialize one post as a feed item
pub fn item(site: &Wildcat, file: &Path, permalink: &str) -> Result<String> {
    let post = site.load_post(file, permalink)?;
    let item = post.to_json_feed_component()?;
    Ok(serde_json::to_string_pretty(&item)?)
}

/// Build a feed document from `(file, permalink)` pairs, in the given order
pub fn document(site: &Wildcat, entries: &[(PathBuf, String)]) -> Result<String> {
    let mut items = Vec::with_capacity(entries.len());
    for (file, permalink) in entries {
        let post = site.load_post(file, permalink)?;
        let item = post
            .to_json_feed_component()
            .with_context(|| format!("Failed to build feed item for {}", post.source_path()))?;
        items.push(item);
    }

    tracing::info!("Built feed with {} items", items.len());
    Ok(JsonFeed::new(&site.config, items).to_json_string()?)
}

/// Parse a `FILE=PERMALINK` argument
pub fn parse_entry(arg: &str) -> Result<(PathBuf, String)> {
    match arg.split_once('=') {
        Some((file, permalink)) if !file.is_empty() && !permalink.is_empty() => {
            Ok((PathBuf::from(file), permalink.to_string()))
        }
        _ => anyhow::bail!("Expected FILE=PERMALINK, got: {}", arg),
    }
}
