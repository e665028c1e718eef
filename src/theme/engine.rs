//! Template engine abstraction

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::SiteConfig;

/// Template loading and rendering errors
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("Template directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failure reported by a [`Renderer`] that is not backed by Tera
    #[error("Render error: {0}")]
    RenderError(String),
}

/// Renders a post template with a context
pub trait Renderer {
    /// Render `template`. `settings` is passed through as-is.
    fn render(
        &self,
        settings: &SiteConfig,
        template: PostTemplate,
        context: &RenderContext<'_>,
    ) -> Result<String, TemplateError>;
}

/// The four post templates
///
/// A post renders either inside a listing (with a link to its permalink) or
/// on its own page, and either with or without a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostTemplate {
    Post,
    PostIncludingLink,
    PostNoTitle,
    PostIncludingLinkNoTitle,
}

impl PostTemplate {
    pub const ALL: [PostTemplate; 4] = [
        PostTemplate::Post,
        PostTemplate::PostIncludingLink,
        PostTemplate::PostNoTitle,
        PostTemplate::PostIncludingLinkNoTitle,
    ];

    /// Pick the template for a display variant
    pub fn select(including_link: bool, titled: bool) -> Self {
        match (including_link, titled) {
            (false, true) => PostTemplate::Post,
            (true, true) => PostTemplate::PostIncludingLink,
            (false, false) => PostTemplate::PostNoTitle,
            (true, false) => PostTemplate::PostIncludingLinkNoTitle,
        }
    }

    /// Get the template name
    pub fn name(&self) -> &'static str {
        match self {
            PostTemplate::Post => "post",
            PostTemplate::PostIncludingLink => "post_including_link",
            PostTemplate::PostNoTitle => "post_no_title",
            PostTemplate::PostIncludingLinkNoTitle => "post_including_link_no_title",
        }
    }

    /// File name of the template inside a template directory
    pub fn file_name(&self) -> &'static str {
        match self {
            PostTemplate::Post => "post.html",
            PostTemplate::PostIncludingLink => "post_including_link.html",
            PostTemplate::PostNoTitle => "post_no_title.html",
            PostTemplate::PostIncludingLinkNoTitle => "post_including_link_no_title.html",
        }
    }
}

impl fmt::Display for PostTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Variables available to a post template
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub permalink: &'a str,
    pub external_url: Option<&'a str>,
    /// `external_url` when present, otherwise `permalink`
    pub link_preferring_external_url: &'a str,
    pub title: Option<&'a str>,
    /// Trusted HTML, never escaped
    pub body: &'a str,
    pub pub_date: DateTime<FixedOffset>,
    /// `pub_date` as "07 Mar 2024"
    pub display_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_select_covers_all_variants() {
        assert_eq!(PostTemplate::select(false, true).name(), "post");
        assert_eq!(
            PostTemplate::select(true, true).name(),
            "post_including_link"
        );
        assert_eq!(PostTemplate::select(false, false).name(), "post_no_title");
        assert_eq!(
            PostTemplate::select(true, false).name(),
            "post_including_link_no_title"
        );

        let names: HashSet<_> = PostTemplate::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_file_names_match_names() {
        for template in PostTemplate::ALL {
            assert_eq!(template.file_name(), format!("{}.html", template.name()));
        }
    }

    #[test]
    fn test_context_serializes_null_external_url() {
        let context = RenderContext {
            permalink: "/2024/03/hello/",
            external_url: None,
            link_preferring_external_url: "/2024/03/hello/",
            title: Some("Hello"),
            body: "<p>Hi</p>",
            pub_date: crate::helpers::parse_date_string("2024-03-07").unwrap(),
            display_date: "07 Mar 2024".to_string(),
        };
        let json = serde_json::to_value(&context).unwrap();
        assert!(json["external_url"].is_null());
        assert_eq!(json["body"], "<p>Hi</p>");
        assert!(json["pub_date"]
            .as_str()
            .unwrap()
            .starts_with("2024-03-07T00:00:00"));
    }
}
