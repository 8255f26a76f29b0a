//! Views: turning a view name and view model into HTML.

use askama::Template;
use ravens_core::{Error, Result, ViewModel};

/// The intro page's view.
pub const INTRO_VIEW: &str = "01-intro";

/// Shown when a guard refuses a visitor.
pub const FORBIDDEN_VIEW: &str = "error-403";

pub trait Renderer: Send + Sync {
    /// Render `view`. Error views are rendered without a model.
    fn render(&self, view: &str, model: Option<&ViewModel>) -> Result<String>;
}

/// Renders the askama templates under `templates/`.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    path_prefix: String,
}

impl TemplateRenderer {
    pub fn new(path_prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
        }
    }

    /// The href for a back link: the previous page, asked to step back.
    fn back_link(&self, model: &ViewModel) -> Option<String> {
        model
            .back_url
            .as_deref()
            .map(|url| format!("{}{}?action=back", self.path_prefix, url))
    }
}

#[derive(Template)]
#[template(path = "01-intro.html")]
struct IntroTemplate<'a> {
    prefix: &'a str,
    back_link: Option<String>,
    errors: Vec<&'a str>,
}

#[derive(Template)]
#[template(path = "error-403.html")]
struct ForbiddenTemplate<'a> {
    prefix: &'a str,
}

impl Renderer for TemplateRenderer {
    fn render(&self, view: &str, model: Option<&ViewModel>) -> Result<String> {
        let blank = ViewModel::default();
        let model = model.unwrap_or(&blank);
        let prefix = self.path_prefix.as_str();

        let rendered = match view {
            INTRO_VIEW => IntroTemplate {
                prefix,
                back_link: self.back_link(model),
                errors: model.active_errors(),
            }
            .render(),
            FORBIDDEN_VIEW => ForbiddenTemplate { prefix }.render(),
            other => return Err(Error::UnknownView(other.to_string())),
        };

        rendered.map_err(|e| Error::Render {
            view: view.to_string(),
            reason: e.to_string(),
        })
    }
}
