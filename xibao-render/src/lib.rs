//! Banner rendering for xibao.
//!
//! Provides:
//! - [`wrap`]: fixed-capacity line breaking
//! - [`FontSizeSolver`]: the largest size whose longest line fits the canvas
//! - [`Compositor`]: per-line centring, stroke then fill, PNG encoding
//! - [`Renderer`]: the entry point over the process-wide font catalog

pub mod canvas;
pub mod compositor;
pub mod error;
pub mod renderer;
pub mod solver;
pub mod wrap;

pub use canvas::Canvas;
pub use compositor::{Compositor, LayoutPlan, LineLayout, TextStyle, encode_png};
pub use error::RenderError;
pub use renderer::{Pipeline, Renderer, resolve_base_typeface};
pub use solver::{FontSizeSolver, legacy_font_size, longest_line};
pub use wrap::wrap;
