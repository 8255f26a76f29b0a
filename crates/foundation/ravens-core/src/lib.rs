//! # Ravens Core
//!
//! Shared vocabulary for the ravens licence application: controller
//! decisions, the next-path table, visit-order guards, history rewriting and
//! the models that flow between controllers, view-model builders and views.
//!
//! ```text
//!   GET  ──▶ guard ──▶ (back? rewrite history) ──▶ ViewModel ──▶ View
//!   POST ──▶ guard ──▶ Controller ──▶ ReturnState ──┬──▶ ValidationError ──▶ View + errors
//!                                                   └──▶ Primary..Quinary ──▶ NextPaths ──▶ redirect
//! ```
//!
//! Nothing in here knows about HTTP; the web crate wires it to axum.

pub mod model;
pub mod navigation;
pub mod next_paths;
pub mod return_state;

pub use model::{ApplicationModel, Errors, ViewModel};
pub use navigation::{guard_allows, previous_page, step_back, BackStep};
pub use next_paths::{NextPaths, ROOT_PATH};
pub use return_state::ReturnState;

/// Result type for ravens operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving a page
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Controller failed: {0}")]
    Controller(String),

    #[error("View '{view}' failed to render: {reason}")]
    Render { view: String, reason: String },

    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("Unsupported method for page {path}: {method}")]
    UnsupportedMethod { path: String, method: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session value could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
