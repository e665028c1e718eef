//! Post templates using the Tera template engine
//!
//! Default templates for all four post variants are embedded in the binary.
//! A site can override any of them by placing a file with the same name
//! (`post.html`, `post_including_link.html`, ...) in its template directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::theme::{PostTemplate, RenderContext, Renderer, TemplateError};

/// Template renderer for posts
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with the built-in post templates loaded
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        // Post bodies are already HTML, nothing may be escaped
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("post.html", include_str!("default/post.html")),
            (
                "post_including_link.html",
                include_str!("default/post_including_link.html"),
            ),
            ("post_no_title.html", include_str!("default/post_no_title.html")),
            (
                "post_including_link_no_title.html",
                include_str!("default/post_including_link_no_title.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);

        Ok(Self { tera })
    }

    /// Built-in templates overridden by the `*.html` files in `dir`
    pub fn with_template_dir<P: AsRef<Path>>(dir: P) -> Result<Self, TemplateError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(TemplateError::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut renderer = Self::new()?;

        let mut files: Vec<(PathBuf, Option<String>)> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string);
            tracing::debug!("Loading template {:?}", path);
            files.push((path, name));
        }

        renderer.tera.add_template_files(files)?;
        Ok(renderer)
    }

    /// Renderer for a site: uses `template_dir` from the config when set,
    /// resolved against `base_dir`
    pub fn for_site<P: AsRef<Path>>(config: &SiteConfig, base_dir: P) -> Result<Self, TemplateError> {
        match &config.template_dir {
            Some(dir) => Self::with_template_dir(base_dir.as_ref().join(dir)),
            None => Self::new(),
        }
    }

    /// Check if a post template is available
    pub fn has_template(&self, template: PostTemplate) -> bool {
        self.tera
            .get_template_names()
            .any(|name| name == template.file_name())
    }
}

impl Renderer for TemplateRenderer {
    fn render(
        &self,
        settings: &SiteConfig,
        template: PostTemplate,
        context: &RenderContext<'_>,
    ) -> Result<String, TemplateError> {
        let mut ctx = Context::from_serialize(context)?;
        ctx.insert("config", settings);
        Ok(self.tera.render(template.file_name(), &ctx)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    Ok(tera::Value::String(result))
}
