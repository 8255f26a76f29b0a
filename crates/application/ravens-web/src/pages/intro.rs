use ravens_config::ApplicationConfig;
use ravens_core::NextPaths;
use std::sync::Arc;

use super::{Page, PageParameters};
use crate::controllers::IntroController;
use crate::view_models::IntroViewModel;
use crate::views::INTRO_VIEW;

pub const INTRO_PATH: &str = "/intro";

/// Build our app's intro page.
pub fn intro_page(config: Arc<ApplicationConfig>) -> Page {
    Page::new(PageParameters {
        path: INTRO_PATH.to_string(),
        view: INTRO_VIEW,
        view_model: Arc::new(IntroViewModel),
        controller: Arc::new(IntroController),
        // Entry page: anyone can land here.
        guard_allow_previous: None,
        next_paths: NextPaths::new("/whatever-comes-next"),
        config,
    })
}
