//! # Funnel Renderer
//!
//! HTML for funnel documents, in two modes:
//!
//! - **authoring**: every block editable and selectable, buttons inert
//! - **public**: read-only page for a published funnel, buttons are links
//!
//! Both walk the block list with a [`funnel_model::BlockVisitor`], so a new
//! block variant fails to compile here until it is rendered.

mod authoring;
mod context;
mod error;
mod public;
mod styles;

pub use authoring::{render_authoring, AuthoringView, ImageViewState, EMPTY_HINT, VIDEO_PLACEHOLDER};
pub use context::RenderOptions;
pub use error::RenderError;
pub use public::{render_public, render_published_funnel};
