//! Page rendering: a template pass followed by wiki link rewriting.
//!
//! Output is fully buffered. A template error yields [`WikiError::Render`]
//! and no partial document ever reaches the client.

pub mod links;
pub mod templates;

use std::sync::Arc;

pub use self::links::LinkRenderer;
pub use self::templates::{MaudTemplates, PageTemplates, Template, TeraTemplates};

use crate::error::WikiError;
use crate::page::Page;

/// Renders pages through a template set and rewrites `[Title]` links.
#[derive(Clone)]
pub struct Renderer {
    templates: Arc<dyn PageTemplates>,
    links: LinkRenderer,
}

impl Renderer {
    pub fn new(templates: Arc<dyn PageTemplates>) -> Self {
        Self {
            templates,
            links: LinkRenderer::new(),
        }
    }

    /// Render `page` through `template` and return the final HTML.
    pub fn render(&self, template: Template, page: &Page) -> Result<String, WikiError> {
        let html = self.templates.render(template, page)?;
        Ok(self.links.rewrite(&html))
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}
