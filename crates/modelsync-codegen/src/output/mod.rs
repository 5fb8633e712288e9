//! Output side of the pipeline: template registry and rendering.
//!
//! Rendering is pure text production; writing the result to disk is the
//! caller's job.

pub mod render;
pub mod templates;

pub use render::{RenderError, generate, render, render_with_template, title_case};
pub use templates::{Template, languages, register_template, template_for_language, templates};
