//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
///
/// Posts hold this behind an `Arc` and hand it to the template renderer
/// untouched; templates see it as `config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Templates
    /// Directory (relative to the site root) with post templates overriding
    /// the built-in ones
    pub template_dir: Option<String>,

    // Feed
    pub json_feed_path: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Wildcat".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            template_dir: None,

            json_feed_path: "feed.json".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded site config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Home page URL, always ending with a slash
    pub fn home_page_url(&self) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            self.root.trim_start_matches('/')
        )
    }

    /// Absolute URL of the JSON feed
    pub fn json_feed_url(&self) -> String {
        format!(
            "{}{}",
            self.home_page_url(),
            self.json_feed_path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Wildcat");
        assert_eq!(config.json_feed_path, "feed.json");
        assert!(config.template_dir.is_none());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
url: https://blog.example.com/
template_dir: templates
podcast_category: Technology
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.template_dir.as_deref(), Some("templates"));
        assert_eq!(config.language, "en");
        assert_eq!(
            config.extra.get("podcast_category"),
            Some(&serde_yaml::Value::String("Technology".to_string()))
        );
    }

    #[test]
    fn test_feed_urls() {
        let config = SiteConfig {
            url: "https://blog.example.com/".to_string(),
            root: "/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.home_page_url(), "https://blog.example.com/");
        assert_eq!(config.json_feed_url(), "https://blog.example.com/feed.json");

        let config = SiteConfig {
            url: "https://example.com".to_string(),
            root: "/blog/".to_string(),
            json_feed_path: "/feeds/all.json".to_string(),
            ..Default::default()
        };
        assert_eq!(config.home_page_url(), "https://example.com/blog/");
        assert_eq!(
            config.json_feed_url(),
            "https://example.com/blog/feeds/all.json"
        );
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title: From Disk\njson_feed_path: items.json").unwrap();

        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.title, "From Disk");
        assert_eq!(config.json_feed_path, "items.json");
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(SiteConfig::load("/nonexistent/_config.yml").is_err());
    }
}
