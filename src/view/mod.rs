//! View layer
//!
//! HTML pages are produced by a [`Renderer`]; XML and JSON documents come
//! straight from the record's serde representation.

mod html;
pub mod serialize;

pub use html::HtmlRenderer;

use crate::model::{Definition, Synset};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template error: {0}")]
    Template(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML serialization failed: {0}")]
    Xml(String),
}

/// Values handed to the page for one `show` request
///
/// `top_bar_synset` feeds the navigation chrome.
#[derive(Debug, Clone, Copy)]
pub struct ShowContext<'a> {
    pub top_bar_synset: &'a Synset,
    pub definition: &'a Definition,
}

pub trait Renderer: Send + Sync {
    fn render_definition(&self, ctx: &ShowContext<'_>) -> Result<String, ViewError>;
}

pub type SharedRenderer = Arc<dyn Renderer>;
