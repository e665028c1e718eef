//! Theme module - the rendering seam between posts and templates

pub mod engine;

pub use engine::{PostTemplate, RenderContext, Renderer, TemplateError};
