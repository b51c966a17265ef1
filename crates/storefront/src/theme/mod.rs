//! Theme-driven page rendering.
//!
//! A store's home layout is rendered in three steps:
//!
//! 1. [`RenderContext::new`] seeds an immutable context from the resolved
//!    store (its theme, or the default) and its published products.
//! 2. [`render`] walks the layout in order and dispatches each block through
//!    the [`registry`], skipping blocks with no renderer.
//! 3. Each [`Section`] renders to an HTML fragment that the page template
//!    embeds.

pub mod context;
pub mod registry;
pub mod render;
pub mod sections;

pub use context::{RenderContext, ThemeStyle};
pub use registry::{RenderFn, is_registered, resolve};
pub use render::{render, render_html, sections};
pub use sections::Section;
