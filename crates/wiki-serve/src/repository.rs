//! Page-level load/save on top of [`Storage`].

use crate::error::WikiError;
use crate::page::{Page, Title};
use crate::storage::Storage;

/// Loads and saves [`Page`]s.
///
/// Read failures are not classified: a missing file and an unreadable file
/// both mean "no page". The underlying cause is only logged.
#[derive(Debug, Clone)]
pub struct PageRepository {
    storage: Storage,
}

impl PageRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Load a page, or `None` if it cannot be read for any reason.
    pub async fn load(&self, title: &Title) -> Option<Page> {
        match self.storage.load(title).await {
            Ok(body) => Some(Page::new(title.clone(), body)),
            Err(err) => {
                tracing::debug!(
                    title = %title,
                    kind = ?err.kind(),
                    error = %err,
                    "page not loaded"
                );
                None
            }
        }
    }

    /// Load a page, falling back to an empty one. Never touches the disk
    /// beyond the read attempt.
    pub async fn load_or_empty(&self, title: &Title) -> Page {
        match self.load(title).await {
            Some(page) => page,
            None => Page::empty(title.clone()),
        }
    }

    /// Persist the page, replacing any previous body.
    pub async fn save(&self, page: &Page) -> Result<(), WikiError> {
        self.storage
            .save(&page.title, &page.body)
            .await
            .map_err(|source| WikiError::Write {
                title: page.title.to_string(),
                source,
            })?;

        tracing::info!(title = %page.title, bytes = page.body.len(), "page saved");
        Ok(())
    }
}
