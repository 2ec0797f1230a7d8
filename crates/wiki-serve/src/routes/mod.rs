//! Route definitions for the wiki.
//!
//! ## Routes
//!
//! - `GET /` - Redirect to `/view/FrontPage`
//! - `GET /health` - Data directory health (JSON)
//! - `GET /view/{title}` - Rendered page, or redirect to its edit form
//! - `GET /edit/{title}` - Edit form
//! - `POST /save/{title}` - Persist the form's `body` field
//!
//! Everything under `/view/`, `/edit/` and `/save/` reaches its handler,
//! which validates the whole path and answers 404 for a bad title. Any
//! other path falls back to the front page redirect.

mod health;
mod pages;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub use self::pages::FRONT_PAGE;

/// Build the complete wiki router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::root))
        .route("/health", get(health::health_check))
        .route("/view/", get(pages::view))
        .route("/view/{*rest}", get(pages::view))
        .route("/edit/", get(pages::edit))
        .route("/edit/{*rest}", get(pages::edit))
        .route("/save/", post(pages::save))
        .route("/save/{*rest}", post(pages::save))
        .fallback(pages::root)
        .with_state(state)
}
