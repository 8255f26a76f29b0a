//! Per-visitor session state.
//!
//! A `Session` is loaded from the `SessionStore` at the start of a request,
//! handed explicitly to whoever needs it, and committed back at the end.
//! Cookie transport lives in the web crate; this crate only deals in ids.

pub mod session;
pub mod store;

pub use session::{Session, APPLICATION_MODEL, PREVIOUS_PAGES};
pub use store::SessionStore;
