//! Application state shared across all request handlers.
//!
//! Everything here is built once at startup and only read afterwards.

use std::sync::Arc;

use crate::config::Config;
use crate::render::{MaudTemplates, PageTemplates, Renderer, TeraTemplates};
use crate::repository::PageRepository;
use crate::storage::Storage;
use crate::title::TitleValidator;

/// Shared application state available to all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Compiled request-path pattern.
    pub titles: TitleValidator,

    /// Page persistence.
    pub pages: PageRepository,

    /// Template set plus link rewriting.
    pub renderer: Renderer,
}

impl AppState {
    /// Create application state, loading templates from
    /// `config.template_dir` when set.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let templates: Arc<dyn PageTemplates> = match &config.template_dir {
            Some(dir) => Arc::new(TeraTemplates::load(dir)?),
            None => Arc::new(MaudTemplates),
        };
        Ok(Self::with_templates(config, templates))
    }

    /// Create application state around an explicit template set.
    pub fn with_templates(config: Config, templates: Arc<dyn PageTemplates>) -> Self {
        let pages = PageRepository::new(Storage::new(config.data_dir.clone()));

        tracing::info!(
            data_dir = %config.data_dir.display(),
            custom_templates = config.template_dir.is_some(),
            "application state initialized"
        );

        Self {
            config: Arc::new(config),
            titles: TitleValidator::new(),
            pages,
            renderer: Renderer::new(templates),
        }
    }
}
