//! The fixed set of pages making up the application.

pub mod intro;
pub mod page;

use axum::Router;
use ravens_config::ApplicationConfig;
use std::sync::Arc;

use crate::state::AppState;

pub use intro::{intro_page, INTRO_PATH};
pub use page::{Page, PageOutcome, PageParameters};

/// The page the root route sends visitors to.
pub const ENTRY_PATH: &str = INTRO_PATH;

/// Every page in the application, in form order.
pub fn pages(config: &Arc<ApplicationConfig>) -> Vec<Page> {
    vec![intro_page(config.clone())]
}

/// Mount each page's GET and POST handlers.
pub fn router(pages: Vec<Page>) -> Router<Arc<AppState>> {
    pages
        .into_iter()
        .fold(Router::new(), |router, page| router.merge(page.into_router()))
}
