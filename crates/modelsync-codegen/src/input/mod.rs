//! Input extractors - turn source definitions into IR.
//!
//! Go is parsed with tree-sitter; TypeScript and Python are extracted
//! lexically. All three sit behind the [`Extractor`](crate::traits::Extractor)
//! trait, so a dialect can move to a real grammar without touching the IR.

#[cfg(feature = "input-go")]
pub mod go;

#[cfg(feature = "input-go")]
pub use go::{GO_EXTRACTOR, GoExtractor, extract_go};

#[cfg(feature = "input-typescript")]
pub mod typescript;

#[cfg(feature = "input-typescript")]
pub use typescript::{TYPESCRIPT_EXTRACTOR, TypeScriptExtractor, extract_typescript};

#[cfg(feature = "input-python")]
pub mod python;

#[cfg(feature = "input-python")]
pub use python::{PYTHON_EXTRACTOR, PythonExtractor, extract_python};
