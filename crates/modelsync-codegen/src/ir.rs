//! Intermediate representation shared by every extractor and template.
//!
//! The IR is intentionally flat: one named definition with an ordered list of
//! fields. Field order is preserved from source to output and duplicate names
//! are kept as-is.

use serde::{Deserialize, Serialize};

/// Type recorded for fields whose dialect carries no lexical type information.
pub const UNKNOWN_TYPE: &str = "unknown";

/// A single extracted definition (struct, interface or class).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ir {
    pub name: String,
    pub fields: Vec<Field>,
}

/// A named, typed member of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl Ir {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field append, mostly useful in tests.
    pub fn with_field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.push(name, ty);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, ty: impl Into<String>) {
        self.fields.push(Field::new(name, ty));
    }

    /// True when no definition was found (empty name).
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Field names that occur more than once, in first-seen order.
    pub fn duplicate_field_names(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        let mut dups: Vec<&str> = Vec::new();
        for field in &self.fields {
            let name = field.name.as_str();
            if seen.contains(&name) {
                if !dups.contains(&name) {
                    dups.push(name);
                }
            } else {
                seen.push(name);
            }
        }
        dups
    }
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// A field whose type cannot be determined lexically.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, UNKNOWN_TYPE)
    }
}
