//! Media attachments (podcast episodes and the like)

use super::attributes::Attributes;
use crate::feed::JsonFeedAttachment;

pub const ENCLOSURE_URL_KEY: &str = "enclosureURL";
pub const ENCLOSURE_TYPE_KEY: &str = "enclosureType";
pub const ENCLOSURE_LENGTH_KEY: &str = "enclosureLength";
pub const ENCLOSURE_DURATION_KEY: &str = "enclosureDuration";
pub const ENCLOSURE_TITLE_KEY: &str = "enclosureTitle";

/// JSON Feed requires a MIME type on every attachment
const DEFAULT_MIME_TYPE: &str = "audio/mpeg";

/// A media file referenced by a post's attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    pub url: String,
    pub mime_type: Option<String>,
    /// Size in bytes
    pub length: Option<u64>,
    /// Duration in seconds
    pub duration: Option<u64>,
    pub title: Option<String>,
}

impl Enclosure {
    /// Build an enclosure from post attributes
    ///
    /// Returns `None` unless the attributes carry a non-empty enclosure URL.
    pub fn from_attributes(attributes: &Attributes) -> Option<Self> {
        let url = attributes.non_empty_text(ENCLOSURE_URL_KEY)?;
        let text = |key: &str| attributes.non_empty_text(key).map(str::to_string);

        Some(Self {
            url: url.to_string(),
            mime_type: text(ENCLOSURE_TYPE_KEY),
            length: attributes.unsigned(ENCLOSURE_LENGTH_KEY),
            duration: attributes.unsigned(ENCLOSURE_DURATION_KEY),
            title: text(ENCLOSURE_TITLE_KEY),
        })
    }

    pub fn to_json_feed_component(&self) -> JsonFeedAttachment {
        JsonFeedAttachment {
            url: self.url.clone(),
            mime_type: self
                .mime_type
                .clone()
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
            title: self.title.clone(),
            size_in_bytes: self.length,
            duration_in_seconds: self.duration,
        }
    }
}
