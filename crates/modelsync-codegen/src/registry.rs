//! Registry for dialect extractors.

use crate::ir::Ir;
use crate::traits::{ExtractError, Extractor};
use std::path::Path;
use std::sync::{OnceLock, RwLock};

/// Global extractor registry.
static EXTRACTORS: RwLock<Vec<&'static dyn Extractor>> = RwLock::new(Vec::new());
static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom extractor.
///
/// Later registrations do not shadow earlier ones: lookups return the first
/// extractor claiming an extension.
pub fn register_extractor(extractor: &'static dyn Extractor) {
    EXTRACTORS.write().unwrap().push(extractor);
}

fn init_builtin() {
    INITIALIZED.get_or_init(|| {
        #[cfg(feature = "input-go")]
        {
            register_extractor(&crate::input::go::GO_EXTRACTOR);
        }
        #[cfg(feature = "input-typescript")]
        {
            register_extractor(&crate::input::typescript::TYPESCRIPT_EXTRACTOR);
        }
        #[cfg(feature = "input-python")]
        {
            register_extractor(&crate::input::python::PYTHON_EXTRACTOR);
        }
    });
}

/// Get an extractor by file extension (without the leading dot).
pub fn extractor_for_extension(ext: &str) -> Option<&'static dyn Extractor> {
    init_builtin();
    EXTRACTORS
        .read()
        .unwrap()
        .iter()
        .find(|e| e.extensions().contains(&ext))
        .copied()
}

/// Get an extractor by dialect name.
pub fn extractor_for_dialect(dialect: &str) -> Option<&'static dyn Extractor> {
    init_builtin();
    EXTRACTORS
        .read()
        .unwrap()
        .iter()
        .find(|e| e.dialect() == dialect)
        .copied()
}

/// Select the extractor for a path, purely from its extension.
pub fn extractor_for_path(path: &Path) -> Result<&'static dyn Extractor, ExtractError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    extractor_for_extension(ext).ok_or_else(|| {
        if ext.is_empty() {
            ExtractError::UnsupportedDialect(format!("{} has no extension", path.display()))
        } else {
            ExtractError::UnsupportedDialect(format!(".{ext}"))
        }
    })
}

/// Read `path` and extract its definition with the matching extractor.
///
/// The dialect is resolved before the file is touched, so an unsupported
/// extension never results in I/O.
pub fn extract_file(path: &Path) -> Result<Ir, ExtractError> {
    let extractor = extractor_for_path(path)?;
    let source = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    extractor.extract(&source)
}

/// List all registered extractors.
pub fn extractors() -> Vec<&'static dyn Extractor> {
    init_builtin();
    EXTRACTORS.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "input-typescript")]
    fn test_extractor_lookup() {
        let extractor = extractor_for_extension("ts").expect("ts extractor");
        assert_eq!(extractor.dialect(), "typescript");

        let extractor = extractor_for_dialect("typescript").expect("typescript extractor");
        assert!(extractor.extensions().contains(&"ts"));
    }

    #[test]
    #[cfg(all(feature = "input-go", feature = "input-python"))]
    fn test_extractor_for_path() {
        let go = extractor_for_path(Path::new("models/book.go")).unwrap();
        assert_eq!(go.dialect(), "go");
        let py = extractor_for_path(Path::new("book.py")).unwrap();
        assert_eq!(py.dialect(), "python");
    }

    #[test]
    fn test_unsupported_extension() {
        let err = extractor_for_path(Path::new("book.rb")).err().unwrap();
        assert!(matches!(err, ExtractError::UnsupportedDialect(ref ext) if ext == ".rb"));

        let err = extractor_for_path(Path::new("Makefile")).err().unwrap();
        assert!(matches!(err, ExtractError::UnsupportedDialect(_)));
    }

    #[test]
    fn test_unsupported_extension_skips_io() {
        // The file does not exist: the dialect error must win over the I/O error.
        let err = extract_file(Path::new("/nonexistent/definition.rb")).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedDialect(_)));
    }

    #[test]
    #[cfg(feature = "input-typescript")]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_file(&dir.path().join("Missing.ts")).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }

    #[test]
    #[cfg(feature = "input-typescript")]
    fn test_extract_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Book.ts");
        std::fs::write(&path, "interface Book { title: string; pages: int; }").unwrap();
        let ir = extract_file(&path).unwrap();
        assert_eq!(ir.name, "Book");
        assert_eq!(ir.fields.len(), 2);
    }
}
