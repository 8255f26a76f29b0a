//! Controllers validate incoming forms and decide which path to take the
//! visitor on next based on their answers.

pub mod intro;

use async_trait::async_trait;
use ravens_config::ApplicationConfig;
use ravens_core::{ApplicationModel, Errors, Result, ReturnState};

use crate::request::PageRequest;

pub use intro::IntroController;

#[async_trait]
pub trait Controller: Send + Sync {
    /// Look over a submission for errors.
    ///
    /// Only inspects the request. `None` means nothing is wrong.
    fn check_errors(&self, request: &PageRequest) -> Option<Errors>;

    /// Handle the submitted form.
    ///
    /// Resolves to `ValidationError` to redisplay the page, or to the branch
    /// the visitor should follow. Changes made to `model` are kept only when
    /// this returns `Ok`.
    async fn handle(
        &self,
        request: &PageRequest,
        model: &mut ApplicationModel,
        config: &ApplicationConfig,
    ) -> Result<ReturnState>;
}
