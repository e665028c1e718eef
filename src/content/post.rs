//! The post model: attribute extraction, cached rendering and feed entries

use chrono::{DateTime, FixedOffset};
use std::sync::Arc;

use super::attributes::{AttributeValue, Attributes};
use super::enclosure::Enclosure;
use super::error::PostError;
use super::source::ParsedFile;
use crate::config::SiteConfig;
use crate::feed::JsonFeedItem;
use crate::helpers::{date_iso8601, display_date};
use crate::theme::{PostTemplate, RenderContext, Renderer};

pub const TITLE_KEY: &str = "title";
pub const LINK_KEY: &str = "link";
pub const PUB_DATE_KEY: &str = "pubDate";

/// A single post
///
/// Everything is read from the source file once, at construction. The two
/// rendered HTML variants are computed on first request and kept for the
/// lifetime of the post.
#[derive(Debug, Clone)]
pub struct Post {
    settings: Arc<SiteConfig>,
    permalink: String,
    external_url: Option<String>,
    title: Option<String>,
    content_html: String,
    pub_date: Option<DateTime<FixedOffset>>,
    enclosure: Option<Enclosure>,
    attributes: Attributes,
    source_path: String,

    rendered_html_including_link: Option<String>,
    rendered_html: Option<String>,
}

impl Post {
    /// Build a post from a parsed source file
    ///
    /// A missing `pubDate` is accepted here; rendering and feed
    /// serialization reject it later.
    pub fn new<F>(
        settings: Arc<SiteConfig>,
        permalink: impl Into<String>,
        file: &F,
    ) -> Result<Self, PostError>
    where
        F: ParsedFile + ?Sized,
    {
        let source_path = file.path().to_string();
        let permalink = permalink.into();

        if permalink.is_empty() {
            return Err(PostError::InvalidInput {
                path: source_path,
                reason: "permalink is empty".to_string(),
            });
        }

        let attributes = file.attributes().map_err(|e| PostError::InvalidInput {
            path: source_path.clone(),
            reason: format!("cannot read attributes: {:#}", e),
        })?;
        let content_html = file.to_html().map_err(|e| PostError::InvalidInput {
            path: source_path.clone(),
            reason: format!("cannot render body: {:#}", e),
        })?;

        let title = attributes.text(TITLE_KEY).map(str::to_string);
        let external_url = attributes.text(LINK_KEY).map(str::to_string);
        let pub_date = attributes.date(PUB_DATE_KEY);
        if pub_date.is_none() && attributes.contains_key(PUB_DATE_KEY) {
            tracing::warn!("Unparseable {} in {}", PUB_DATE_KEY, source_path);
        }
        let enclosure = Enclosure::from_attributes(&attributes);

        tracing::debug!(
            "Loaded post {} from {} (enclosure: {})",
            permalink,
            source_path,
            enclosure.is_some()
        );

        Ok(Self {
            settings,
            permalink,
            external_url,
            title,
            content_html,
            pub_date,
            enclosure,
            attributes,
            source_path,
            rendered_html_including_link: None,
            rendered_html: None,
        })
    }

    pub fn permalink(&self) -> &str {
        &self.permalink
    }

    pub fn external_url(&self) -> Option<&str> {
        self.external_url.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn content_html(&self) -> &str {
        &self.content_html
    }

    pub fn pub_date(&self) -> Option<DateTime<FixedOffset>> {
        self.pub_date
    }

    pub fn enclosure(&self) -> Option<&Enclosure> {
        self.enclosure.as_ref()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Look up any attribute from the source file
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn settings(&self) -> &SiteConfig {
        &self.settings
    }

    /// The external URL when the post has one, otherwise the permalink
    pub fn link_preferring_external_url(&self) -> &str {
        self.external_url.as_deref().unwrap_or(&self.permalink)
    }

    fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Template used for a display variant
    pub fn template_for(&self, including_link: bool) -> PostTemplate {
        PostTemplate::select(including_link, self.has_title())
    }

    fn require_pub_date(&self) -> Result<DateTime<FixedOffset>, PostError> {
        if let Some(pub_date) = self.pub_date {
            return Ok(pub_date);
        }
        let path = self.source_path.clone();
        Err(match self.attributes.text(PUB_DATE_KEY) {
            Some(value) => PostError::InvalidPubDate {
                path,
                value: value.to_string(),
            },
            None => PostError::MissingPubDate { path },
        })
    }

    /// Publication date as "07 Mar 2024"
    pub fn display_date(&self) -> Result<String, PostError> {
        Ok(display_date(&self.require_pub_date()?))
    }

    /// Rendered HTML for one display variant
    ///
    /// `including_link` is for pages listing several posts, where each post
    /// links to its permalink. Without it, the HTML is for the page the
    /// permalink points to. Each variant is rendered at most once.
    pub fn to_html<R>(&mut self, renderer: &R, including_link: bool) -> Result<&str, PostError>
    where
        R: Renderer + ?Sized,
    {
        let html = match self.cache_slot(including_link).take() {
            Some(html) => {
                tracing::trace!("Using cached HTML for {}", self.permalink);
                html
            }
            None => self.render_with_template(renderer, including_link)?,
        };

        Ok(self.cache_slot(including_link).insert(html).as_str())
    }

    fn cache_slot(&mut self, including_link: bool) -> &mut Option<String> {
        if including_link {
            &mut self.rendered_html_including_link
        } else {
            &mut self.rendered_html
        }
    }

    fn render_with_template<R>(&self, renderer: &R, including_link: bool) -> Result<String, PostError>
    where
        R: Renderer + ?Sized,
    {
        let template = self.template_for(including_link);
        let context = self.context()?;

        tracing::debug!("Rendering {} with template {}", self.permalink, template);

        renderer
            .render(&self.settings, template, &context)
            .map_err(|source| PostError::Template {
                path: self.source_path.clone(),
                template: template.name(),
                source,
            })
    }

    /// Variables handed to the post template
    pub fn context(&self) -> Result<RenderContext<'_>, PostError> {
        let pub_date = self.require_pub_date()?;
        Ok(RenderContext {
            permalink: &self.permalink,
            external_url: self.external_url.as_deref(),
            link_preferring_external_url: self.link_preferring_external_url(),
            title: self.title.as_deref(),
            body: &self.content_html,
            pub_date,
            display_date: display_date(&pub_date),
        })
    }

    /// The post as a JSON Feed item
    pub fn to_json_feed_component(&self) -> Result<JsonFeedItem, PostError> {
        let pub_date = self.require_pub_date()?;

        Ok(JsonFeedItem {
            id: self.permalink.clone(),
            url: self.permalink.clone(),
            external_url: self.external_url.clone().filter(|url| !url.is_empty()),
            content_html: self.content_html.clone(),
            date_published: date_iso8601(&pub_date),
            attachments: self
                .enclosure
                .iter()
                .map(Enclosure::to_json_feed_component)
                .collect(),
        })
    }
}
