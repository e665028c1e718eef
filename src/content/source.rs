//! Source files: the parsed input a post is built from

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::attributes::Attributes;
use super::frontmatter;
use super::markdown::MarkdownRenderer;

/// A parsed source file, as consumed by [`crate::content::Post::new`]
pub trait ParsedFile {
    /// Path of the originating file, used for diagnostics
    fn path(&self) -> &str;

    /// Raw attributes from the file's metadata block
    fn attributes(&self) -> Result<Attributes>;

    /// Body rendered to HTML
    fn to_html(&self) -> Result<String>;
}

/// A markdown file with optional YAML front-matter
///
/// ```text
/// ---
/// title: Episode 12
/// pubDate: 2024-03-07
/// enclosureURL: https://cdn.example.com/ep12.mp3
/// ---
///
/// Show notes in **markdown**.
/// ```
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: String,
    front_matter: Option<String>,
    body: String,
    renderer: MarkdownRenderer,
}

impl SourceFile {
    /// Read and split a source file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file {:?}", path))?;
        Ok(Self::from_string(path.to_string_lossy(), &content))
    }

    /// Split already loaded content
    pub fn from_string<S: Into<String>>(path: S, content: &str) -> Self {
        let (front_matter, body) = frontmatter::split(content);
        Self {
            path: path.into(),
            front_matter: front_matter.map(str::to_string),
            body: body.to_string(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Raw markdown body, front-matter removed
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl ParsedFile for SourceFile {
    fn path(&self) -> &str {
        &self.path
    }

    fn attributes(&self) -> Result<Attributes> {
        match &self.front_matter {
            Some(yaml) => frontmatter::parse_attributes(yaml)
                .with_context(|| format!("Invalid front-matter in {}", self.path)),
            None => Ok(Attributes::new()),
        }
    }

    fn to_html(&self) -> Result<String> {
        Ok(self.renderer.render(&self.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EPISODE: &str = r#"---
title: Episode 12
pubDate: 2024-03-07
enclosureURL: https://cdn.example.com/ep12.mp3
---

Show notes in **markdown**.
"#;

    #[test]
    fn test_from_string() {
        let file = SourceFile::from_string("posts/ep12.md", EPISODE);
        assert_eq!(file.path(), "posts/ep12.md");
        assert_eq!(file.body(), "Show notes in **markdown**.\n");

        let attributes = file.attributes().unwrap();
        assert_eq!(attributes.text("title"), Some("Episode 12"));
        assert!(attributes.date("pubDate").is_some());

        let html = file.to_html().unwrap();
        assert_eq!(html, "<p>Show notes in <strong>markdown</strong>.</p>\n");
    }

    #[test]
    fn test_without_frontmatter() {
        let file = SourceFile::from_string("note.md", "Just a note.");
        assert!(file.attributes().unwrap().is_empty());
        assert_eq!(file.to_html().unwrap(), "<p>Just a note.</p>\n");
    }

    #[test]
    fn test_broken_frontmatter_fails_on_attributes() {
        let file = SourceFile::from_string("broken.md", "---\ntitle: [oops\n---\nBody\n");
        let err = file.attributes().unwrap_err();
        assert!(format!("{:#}", err).contains("broken.md"));
    }

    #[test]
    fn test_load_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(EPISODE.as_bytes()).unwrap();

        let file = SourceFile::load(tmp.path()).unwrap();
        assert_eq!(
            file.attributes().unwrap().text("enclosureURL"),
            Some("https://cdn.example.com/ep12.mp3")
        );
    }

    #[test]
    fn test_load_missing_file() {
        assert!(SourceFile::load("/nonexistent/post.md").is_err());
    }
}
