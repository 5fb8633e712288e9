//! Model extraction and templated code generation.
//!
//! `modelsync-codegen` pulls a single structural definition out of a source
//! file, normalizes it into a flat IR and re-emits it in other languages.
//!
//! # Architecture
//!
//! ```text
//! Source Dialects          IR                Target Languages
//! ───────────────    ─────────────    ──────────────────────────────
//! Go (tree-sitter) ─┐                ┌─> typemap ─> template ─> TypeScript
//! TypeScript       ─┼─> Ir ──────────┼─> typemap ─> template ─> C# / C++
//! Python           ─┘   (ir.rs)      └─> typemap ─> template ─> Python / Java
//! ```
//!
//! # Example
//!
//! ```
//! use modelsync_codegen::{input, output};
//!
//! let ir = input::extract_typescript("interface Book { title: string; pages: int; }").unwrap();
//! let cpp = output::generate(&ir, "cpp").unwrap();
//! assert!(cpp.contains("std::string title;"));
//! ```
//!
//! # Feature Flags
//!
//! - `input-go` - Go struct extraction (pulls in tree-sitter)
//! - `input-typescript` - TypeScript interface extraction
//! - `input-python` - Python class extraction

pub mod input;
pub mod ir;
pub mod output;
pub mod registry;
pub mod traits;
pub mod typemap;

// Re-exports: IR types
pub use ir::{Field, Ir, UNKNOWN_TYPE};

// Re-exports: Traits
pub use traits::{ExtractError, Extractor};

// Re-exports: Registry
pub use registry::{
    extract_file, extractor_for_dialect, extractor_for_extension, extractor_for_path,
    extractors, register_extractor,
};

// Re-exports: Type mapping
pub use typemap::{
    TypeMap, map_ir, map_type, register_type_map, type_map_for_language, type_map_languages,
};

// Re-exports: Rendering
pub use output::{
    RenderError, Template, generate, languages, register_template, render,
    render_with_template, template_for_language, templates, title_case,
};
