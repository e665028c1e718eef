//! Content module - posts, their attributes and source files

mod attributes;
pub mod enclosure;
mod error;
mod frontmatter;
mod markdown;
mod post;
mod source;

pub use attributes::{AttributeValue, Attributes};
pub use enclosure::Enclosure;
pub use error::PostError;
pub use markdown::MarkdownRenderer;
pub use post::{Post, LINK_KEY, PUB_DATE_KEY, TITLE_KEY};
pub use source::{ParsedFile, SourceFile};
