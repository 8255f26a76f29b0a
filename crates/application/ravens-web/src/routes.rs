//! Route definitions outside the pages themselves, plus the glue that runs
//! a page against the visitor's session.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum::routing::get;
use axum::Router;
use ravens_config::{ApplicationConfig, Config, SameSitePolicy};
use serde_json::json;
use std::sync::Arc;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

use crate::pages::{Page, ENTRY_PATH};
use crate::request::PageRequest;
use crate::state::AppState;

/// `{prefix}/` for both GET and POST, always redirecting to the entry page.
pub fn root_router(config: &ApplicationConfig) -> Router<Arc<AppState>> {
    Router::new().route(&config.url("/"), get(root_redirect).post(root_redirect))
}

/// Health check, `{prefix}/health`.
pub fn health_router(config: &ApplicationConfig) -> Router<Arc<AppState>> {
    Router::new().route(&config.url("/health"), get(health))
}

async fn root_redirect(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::to(&state.application.url(ENTRY_PATH))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "message": "OK" }))
}

/// Load the visitor's session, run the page, render, then commit the session.
/// Nothing is committed when the request fails.
pub async fn serve_page(
    page: Arc<Page>,
    state: Arc<AppState>,
    cookies: Cookies,
    request: PageRequest,
) -> Response {
    let session_config = &state.config.session;
    let session_id = cookies
        .get(&session_config.cookie_name)
        .map(|c| c.value().to_string());
    let mut session = state.sessions.load(session_id.as_deref()).await;

    let outcome = match page.handle(&request, &mut session).await {
        Ok(outcome) => outcome,
        Err(e) => return internal_error(page.path(), &e),
    };

    let response = page.respond(outcome, state.views.as_ref());
    if response.status() == StatusCode::INTERNAL_SERVER_ERROR {
        return response;
    }

    if let Some(id) = state.sessions.commit(session).await {
        cookies.add(session_cookie(&state.config, id));
    }
    response
}

/// The visitor's session cookie.
pub fn session_cookie(config: &Config, id: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(config.session.cookie_name.clone(), id);
    cookie.set_path(config.cookie_path());
    cookie.set_http_only(true);
    cookie.set_secure(config.session.secure);
    cookie.set_same_site(match config.session.same_site {
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::Lax => SameSite::Lax,
        SameSitePolicy::None => SameSite::None,
    });
    cookie
}

/// Log a failure and answer with a bare 500.
pub fn internal_error(path: &str, error: &ravens_core::Error) -> Response {
    tracing::error!(page = path, "Request failed: {}", error);
    (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
}

/// Every route the application mounts, as (method, path, description).
pub fn route_table(config: &ApplicationConfig, pages: &[Page]) -> Vec<(&'static str, String, String)> {
    let mut routes = vec![
        ("GET", config.url("/"), format!("Redirect to {}", config.url(ENTRY_PATH))),
        ("POST", config.url("/"), format!("Redirect to {}", config.url(ENTRY_PATH))),
        ("GET", config.url("/health"), "Health check".to_string()),
    ];
    for page in pages {
        routes.push(("GET", page.mount_path(), format!("Render view {}", page.view())));
        routes.push((
            "POST",
            page.mount_path(),
            format!("Submit, then on to {}", config.url(&page.next_paths().primary)),
        ));
    }
    routes.push(("GET", "/assets/{filename}".to_string(), "Static assets".to_string()));
    routes
}

/// Print all routes
pub fn print_routes(config: &ApplicationConfig, pages: &[Page]) {
    println!("\nRavens Routes:");
    println!("{:-<60}", "");
    for (method, path, desc) in route_table(config, pages) {
        println!("{:6} {:30} {}", method, path, desc);
    }
    println!();
}
