//! View-model builders project the visitor's answers into what a view needs.

pub mod intro;

use async_trait::async_trait;
use ravens_config::ApplicationConfig;
use ravens_core::{ApplicationModel, Errors, Result, ViewModel};

pub use intro::IntroViewModel;

#[async_trait]
pub trait ViewModelBuilder: Send + Sync {
    /// Build a view model.
    ///
    /// `back_url` is where the '< Back' link should go (`None` hides it) and
    /// `error` carries the controller's error flags on a redisplay.
    async fn build(
        &self,
        back_url: Option<String>,
        model: &ApplicationModel,
        config: &ApplicationConfig,
        error: Option<Errors>,
    ) -> Result<ViewModel>;
}

/// The generic view model every page starts from: just the back link and
/// any errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseViewModel;

#[async_trait]
impl ViewModelBuilder for BaseViewModel {
    async fn build(
        &self,
        back_url: Option<String>,
        _model: &ApplicationModel,
        _config: &ApplicationConfig,
        error: Option<Errors>,
    ) -> Result<ViewModel> {
        Ok(ViewModel::new(back_url, error))
    }
}
