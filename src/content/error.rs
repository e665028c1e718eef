//! Post errors

use thiserror::Error;

use crate::theme::TemplateError;

/// Errors raised while building, rendering or serializing a post
#[derive(Error, Debug)]
pub enum PostError {
    /// The post could not be constructed from its input
    #[error("Invalid post {path}: {reason}")]
    InvalidInput { path: String, reason: String },

    /// Rendering or feed serialization needs a publication date
    #[error("Post {path} has no pubDate")]
    MissingPubDate { path: String },

    /// The pubDate attribute is present but is not a recognized date
    #[error("Post {path} has an unparseable pubDate {value:?}")]
    InvalidPubDate { path: String, value: String },

    /// The template renderer failed
    #[error("Failed to render {path} with template {template}: {source}")]
    Template {
        path: String,
        template: &'static str,
        #[source]
        source: TemplateError,
    },
}

impl PostError {
    /// Source file of the post that failed
    pub fn source_path(&self) -> &str {
        match self {
            PostError::InvalidInput { path, .. }
            | PostError::MissingPubDate { path }
            | PostError::InvalidPubDate { path, .. }
            | PostError::Template { path, .. } => path,
        }
    }

    /// Whether the error came from rendering or serializing an already
    /// constructed post
    pub fn is_render_error(&self) -> bool {
        matches!(
            self,
            PostError::MissingPubDate { .. }
                | PostError::InvalidPubDate { .. }
                | PostError::Template { .. }
        )
    }
}
