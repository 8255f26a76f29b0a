//! Application state shared by every request

use ravens_config::{ApplicationConfig, Config};
use ravens_core::Result;
use ravens_session::SessionStore;
use std::sync::Arc;

use crate::views::{Renderer, TemplateRenderer};

#[derive(Clone)]
pub struct AppState {
    /// Full startup configuration
    pub config: Arc<Config>,
    /// The part of the configuration injected into pages
    pub application: Arc<ApplicationConfig>,
    /// Every visitor's session
    pub sessions: SessionStore,
    /// Turns views and view models into HTML
    pub views: Arc<dyn Renderer>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let views = Arc::new(TemplateRenderer::new(&config.application.path_prefix));
        Self::with_views(config, views)
    }

    /// Fails when the session idle timeout is unusable.
    pub fn with_views(config: Config, views: Arc<dyn Renderer>) -> Result<Self> {
        Ok(Self {
            application: Arc::new(config.application.clone()),
            sessions: SessionStore::with_idle_minutes(config.session.idle_timeout_minutes)?,
            config: Arc::new(config),
            views,
        })
    }
}
