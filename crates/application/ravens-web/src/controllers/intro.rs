//! The intro page has no inputs and only one way forward.

use async_trait::async_trait;
use ravens_config::ApplicationConfig;
use ravens_core::{ApplicationModel, Errors, Result, ReturnState};

use super::Controller;
use crate::request::PageRequest;

/// Controller for the intro page. Never finds errors, always moves on.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntroController;

#[async_trait]
impl Controller for IntroController {
    fn check_errors(&self, _request: &PageRequest) -> Option<Errors> {
        None
    }

    async fn handle(
        &self,
        _request: &PageRequest,
        _model: &mut ApplicationModel,
        _config: &ApplicationConfig,
    ) -> Result<ReturnState> {
        Ok(ReturnState::Primary)
    }
}
