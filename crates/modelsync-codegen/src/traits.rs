//! Traits for source dialect extractors.

use crate::ir::Ir;
use std::path::PathBuf;

/// Error that can occur while extracting a definition into the IR.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("unsupported dialect: {0}")]
    UnsupportedDialect(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {0}")]
    Parse(String),
}

/// An extractor turns the source text of one dialect into an [`Ir`].
///
/// Extractors honor a single top-level definition and ignore the rest of the
/// file. They never write anything.
///
/// # Implementing Custom Extractors
///
/// ```ignore
/// use modelsync_codegen::{ExtractError, Extractor, Ir, register_extractor};
///
/// struct ProtoExtractor;
///
/// impl Extractor for ProtoExtractor {
///     fn dialect(&self) -> &'static str { "protobuf" }
///     fn extensions(&self) -> &'static [&'static str] { &["proto"] }
///     fn extract(&self, source: &str) -> Result<Ir, ExtractError> { /* ... */ }
/// }
///
/// register_extractor(&ProtoExtractor);
/// ```
pub trait Extractor: Send + Sync {
    /// Dialect identifier (e.g., "go", "typescript", "python").
    fn dialect(&self) -> &'static str;

    /// File extensions this extractor handles, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Extract the first definition found in `source`.
    fn extract(&self, source: &str) -> Result<Ir, ExtractError>;
}
