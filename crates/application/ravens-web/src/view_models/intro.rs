//! Our intro page's view model is basically empty.

use async_trait::async_trait;
use ravens_config::ApplicationConfig;
use ravens_core::{ApplicationModel, Errors, Result, ViewModel};

use super::{BaseViewModel, ViewModelBuilder};

/// The intro page is the first page, so it never shows a back link
/// whatever history says.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntroViewModel;

#[async_trait]
impl ViewModelBuilder for IntroViewModel {
    async fn build(
        &self,
        _back_url: Option<String>,
        model: &ApplicationModel,
        config: &ApplicationConfig,
        error: Option<Errors>,
    ) -> Result<ViewModel> {
        BaseViewModel.build(None, model, config, error).await
    }
}
