//! Wiki Serve - a minimal file-backed wiki over HTTP.
//!
//! Pages are identified by a title and stored as flat text files, one per
//! page. Pages can be viewed, edited through an HTML form, and saved.
//!
//! # Architecture
//!
//! - **Title**: Validates request paths against `^/(edit|save|view)/([A-Za-z0-9]+)$`
//! - **Storage / Repository**: Reads and writes `<data_dir>/<title>.txt`
//! - **Render**: `view` and `edit` templates (maud or files), then `[Title]` link rewriting
//! - **Routes**: axum handlers wiring the above together
//!
//! There is no locking, caching or versioning. Concurrent saves to the same
//! page are last-write-wins.

pub mod config;
pub mod error;
pub mod form;
pub mod page;
pub mod render;
pub mod repository;
pub mod routes;
pub mod state;
pub mod storage;
pub mod title;

pub use config::Config;
pub use error::WikiError;
pub use page::{Page, Title};
pub use routes::router;
pub use state::AppState;
