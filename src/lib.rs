//! wildcat: the post model of a static site generator
//!
//! A [`content::Post`] is built from a parsed source file and a permalink.
//! It renders itself through a [`theme::Renderer`] in two variants (inside a
//! listing, or on its own page), caching each, and serializes itself as a
//! JSON Feed item.
//!
//! Finding source files, choosing permalinks and writing output are left to
//! the caller.

pub mod commands;
pub mod config;
pub mod content;
pub mod feed;
pub mod helpers;
pub mod templates;
pub mod theme;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::{Post, SourceFile};
use templates::TemplateRenderer;

/// A site: its configuration and the renderer for its posts
pub struct Wildcat {
    /// Site configuration, shared with every post
    pub config: Arc<config::SiteConfig>,
    /// Base directory
    pub base_dir: PathBuf,
    /// Post template renderer
    pub renderer: TemplateRenderer,
}

impl Wildcat {
    /// Open a site directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Self::with_config(base_dir, config)
    }

    /// Use an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let renderer = TemplateRenderer::for_site(&config, &base_dir)?;

        Ok(Self {
            config: Arc::new(config),
            base_dir,
            renderer,
        })
    }

    /// Load one source file as a post
    pub fn load_post<P: AsRef<Path>>(&self, path: P, permalink: &str) -> Result<Post> {
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };
        let source = SourceFile::load(&path)?;
        Ok(Post::new(Arc::clone(&self.config), permalink, &source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_open_site_and_render_post() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "title: Test Site\ntemplate_dir: templates\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("templates")).unwrap();
        fs::write(
            dir.path().join("templates/post_including_link.html"),
            "<li><a href=\"{{ link_preferring_external_url }}\">{{ title }}</a> ({{ config.title }})</li>",
        )
        .unwrap();
        fs::write(
            dir.path().join("hello.md"),
            "---\ntitle: Hello\npubDate: 2024-03-07\n---\nHi there.\n",
        )
        .unwrap();

        let site = Wildcat::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "Test Site");

        let mut post = site.load_post("hello.md", "/hello/").unwrap();
        let html = post.to_html(&site.renderer, true).unwrap();
        assert_eq!(html, "<li><a href=\"/hello/\">Hello</a> (Test Site)</li>");

        let standalone = post.to_html(&site.renderer, false).unwrap();
        assert!(standalone.contains("<p>Hi there.</p>"));
    }

    #[test]
    fn test_load_post_with_empty_permalink() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "Body only").unwrap();

        let site = Wildcat::new(dir.path()).unwrap();
        let err = site.load_post("a.md", "").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<content::PostError>(),
            Some(content::PostError::InvalidInput { .. })
        ));
    }
}
