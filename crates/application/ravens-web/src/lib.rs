//! Ravens licence application web form.
//!
//! Every page runs one Model -> ViewModel -> View -> Controller cycle:
//!
//! - **GET** renders the page's view from a view model
//! - **POST** hands the form to the page's controller, which either asks for
//!   a redisplay with errors or names the branch to follow next
//! - **Guards** stop visitors jumping into the middle of the form
//! - **History** of submitted pages lives in the visitor's session and drives
//!   the back link
//!
//! Pages are fixed at startup; see [`pages::pages`].

pub mod controllers;
pub mod pages;
pub mod request;
pub mod routes;
pub mod state;
pub mod view_models;
pub mod views;

use axum::Router;
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use pages::{Page, PageOutcome, PageParameters};
pub use request::PageRequest;
pub use state::AppState;

/// How often expired sessions are swept while serving.
const SESSION_SWEEP_SECS: u64 = 300;

/// Create the main router with the fixed page set
pub fn create_router(state: Arc<AppState>) -> Router {
    let pages = pages::pages(&state.application);
    create_router_with(state, pages)
}

/// Create the router around an explicit page set.
pub fn create_router_with(state: Arc<AppState>, pages: Vec<Page>) -> Router {
    let assets = ServeDir::new(&state.config.server.assets_dir);

    Router::new()
        .merge(routes::root_router(&state.application))
        .merge(routes::health_router(&state.application))
        .merge(pages::router(pages))
        .nest_service("/assets", assets)
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server
pub async fn serve(state: Arc<AppState>) -> ravens_core::Result<()> {
    let addr = state.config.server.bind_addr();
    let app = create_router(state.clone());

    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut sweep = tokio::time::interval(std::time::Duration::from_secs(SESSION_SWEEP_SECS));
        loop {
            sweep.tick().await;
            let purged = sessions.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "Purged expired sessions");
            }
        }
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "Ravens listening on http://{}{}/",
        addr,
        state.application.path_prefix
    );

    axum::serve(listener, app).await?;
    Ok(())
}
