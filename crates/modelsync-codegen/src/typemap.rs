//! Per-language primitive type mapping.
//!
//! Lookups never fail: a type with no entry for the language (or a language
//! with no table at all) passes through unchanged, so custom and composite
//! types such as `[]Book` flow into the output as written.

use crate::ir::{Field, Ir};
use std::sync::{OnceLock, RwLock};

/// Mapping from IR type names to one language's native spellings.
#[derive(Debug)]
pub struct TypeMap {
    pub language: &'static str,
    pub entries: &'static [(&'static str, &'static str)],
}

impl TypeMap {
    pub fn get(&self, ty: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(from, _)| *from == ty)
            .map(|(_, to)| *to)
    }

    /// Map `ty`, falling back to the input when there is no entry.
    pub fn map(&self, ty: &str) -> String {
        self.get(ty).unwrap_or(ty).to_string()
    }
}

pub static TYPESCRIPT_TYPES: TypeMap = TypeMap {
    language: "typescript",
    entries: &[
        ("string", "string"),
        ("int", "number"),
        ("float", "number"),
        ("bool", "boolean"),
        ("number", "number"),
        ("boolean", "boolean"),
        ("float64", "number"),
        ("float32", "number"),
        ("int64", "number"),
        ("int32", "number"),
        ("byte", "number"),
        ("rune", "string"),
    ],
};

pub static CSHARP_TYPES: TypeMap = TypeMap {
    language: "csharp",
    entries: &[
        ("string", "string"),
        ("int", "int"),
        ("float", "float"),
        ("bool", "bool"),
        ("number", "double"),
        ("boolean", "bool"),
        ("float64", "double"),
        ("float32", "float"),
        ("int64", "long"),
        ("int32", "int"),
        ("byte", "byte"),
        ("rune", "char"),
    ],
};

pub static CPP_TYPES: TypeMap = TypeMap {
    language: "cpp",
    entries: &[
        ("string", "std::string"),
        ("int", "int"),
        ("float", "float"),
        ("bool", "bool"),
        ("number", "double"),
        ("boolean", "bool"),
        ("float64", "double"),
        ("float32", "float"),
        ("int64", "int64_t"),
        ("int32", "int32_t"),
        ("byte", "uint8_t"),
        ("rune", "char32_t"),
    ],
};

pub static PYTHON_TYPES: TypeMap = TypeMap {
    language: "python",
    entries: &[
        ("string", "str"),
        ("int", "int"),
        ("float", "float"),
        ("bool", "bool"),
        ("number", "float"),
        ("boolean", "bool"),
        ("float64", "float"),
        ("float32", "float"),
        ("int64", "int"),
        ("int32", "int"),
        ("byte", "int"),
        ("rune", "str"),
    ],
};

pub static JAVA_TYPES: TypeMap = TypeMap {
    language: "java",
    entries: &[
        ("string", "String"),
        ("int", "int"),
        ("float", "float"),
        ("bool", "boolean"),
        ("number", "double"),
        ("boolean", "boolean"),
        ("float64", "double"),
        ("float32", "float"),
        ("int64", "long"),
        ("int32", "int"),
        ("byte", "byte"),
        ("rune", "char"),
    ],
};

static TYPE_MAPS: RwLock<Vec<&'static TypeMap>> = RwLock::new(Vec::new());
static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a type map for an additional language.
pub fn register_type_map(map: &'static TypeMap) {
    TYPE_MAPS.write().unwrap().push(map);
}

fn init_builtin() {
    INITIALIZED.get_or_init(|| {
        let mut maps = TYPE_MAPS.write().unwrap();
        maps.push(&TYPESCRIPT_TYPES);
        maps.push(&CSHARP_TYPES);
        maps.push(&CPP_TYPES);
        maps.push(&PYTHON_TYPES);
        maps.push(&JAVA_TYPES);
    });
}

/// Get the type map registered for a language.
pub fn type_map_for_language(language: &str) -> Option<&'static TypeMap> {
    init_builtin();
    TYPE_MAPS
        .read()
        .unwrap()
        .iter()
        .find(|m| m.language == language)
        .copied()
}

/// List all languages with a registered type map.
pub fn type_map_languages() -> Vec<&'static str> {
    init_builtin();
    TYPE_MAPS.read().unwrap().iter().map(|m| m.language).collect()
}

/// Map a single IR type name to its spelling in `language`.
pub fn map_type(language: &str, ty: &str) -> String {
    match type_map_for_language(language) {
        Some(map) => map.map(ty),
        None => ty.to_string(),
    }
}

/// Produce a copy of `ir` with every field type mapped for `language`.
///
/// Definition and field names are never touched.
pub fn map_ir(ir: &Ir, language: &str) -> Ir {
    let map = type_map_for_language(language);
    Ir {
        name: ir.name.clone(),
        fields: ir
            .fields
            .iter()
            .map(|f| Field {
                name: f.name.clone(),
                ty: map.map_or_else(|| f.ty.clone(), |m| m.map(&f.ty)),
            })
            .collect(),
    }
}
