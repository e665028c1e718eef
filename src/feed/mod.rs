//! JSON Feed (version 1) serialization
//!
//! Field names and omission rules follow <https://jsonfeed.org/version/1>:
//! optional fields are left out entirely rather than written as `null`.

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;

pub const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1";

/// One entry of a feed's `items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonFeedItem {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    pub content_html: String,
    pub date_published: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<JsonFeedAttachment>,
}

/// A media file attached to an item, e.g. a podcast episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonFeedAttachment {
    pub url: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_in_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonFeedAuthor {
    pub name: String,
}

/// A complete feed document
///
/// The caller decides which posts go in and in what order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonFeed {
    pub version: String,
    pub title: String,
    pub home_page_url: String,
    pub feed_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<JsonFeedAuthor>,
    pub items: Vec<JsonFeedItem>,
}

impl JsonFeed {
    pub fn new(config: &SiteConfig, items: Vec<JsonFeedItem>) -> Self {
        let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());
        Self {
            version: JSON_FEED_VERSION.to_string(),
            title: config.title.clone(),
            home_page_url: config.home_page_url(),
            feed_url: config.json_feed_url(),
            description: non_empty(&config.description),
            author: non_empty(&config.author).map(|name| JsonFeedAuthor { name }),
            items,
        }
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> JsonFeedItem {
        JsonFeedItem {
            id: id.to_string(),
            url: id.to_string(),
            external_url: None,
            content_html: "<p>hi</p>".to_string(),
            date_published: "2024-03-07T00:00:00Z".to_string(),
            attachments: Vec::new(),
        }
    }

    #[test]
    fn test_item_omits_optional_fields() {
        let json = serde_json::to_value(item("/a/")).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["id", "url", "content_html", "date_published"]);
    }

    #[test]
    fn test_attachment_omits_unknown_sizes() {
        let attachment = JsonFeedAttachment {
            url: "https://cdn.example.com/ep1.mp3".to_string(),
            mime_type: "audio/mpeg".to_string(),
            title: None,
            size_in_bytes: Some(42),
            duration_in_seconds: None,
        };
        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json["size_in_bytes"], 42);
        assert!(json.get("duration_in_seconds").is_none());
        assert!(json.get("title").is_none());
    }

    #[test]
    fn test_feed_document() {
        let config = SiteConfig {
            title: "My Podcast".to_string(),
            url: "https://pod.example.com".to_string(),
            author: "Jane".to_string(),
            ..Default::default()
        };
        let feed = JsonFeed::new(&config, vec![item("/1/"), item("/2/")]);
        assert_eq!(feed.version, JSON_FEED_VERSION);
        assert_eq!(feed.home_page_url, "https://pod.example.com/");
        assert_eq!(feed.feed_url, "https://pod.example.com/feed.json");
        assert!(feed.description.is_none());

        let json: serde_json::Value = serde_json::from_str(&feed.to_json_string().unwrap()).unwrap();
        assert_eq!(json["author"]["name"], "Jane");
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
        assert!(json.get("description").is_none());
    }
}
