//! TypeScript interface extraction.
//!
//! A lexical extractor: the first `interface` block is located with a regex
//! and its members are split into `name: type` pairs. No TypeScript grammar
//! is involved, so nested object literal types are not supported.

use crate::ir::Ir;
use crate::traits::{ExtractError, Extractor};
use regex::Regex;
use std::sync::LazyLock;

static INTERFACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"interface\s+(\w+)\s*(?:<[^>{]*>)?\s*(?:extends\s+[^{]*)?\{([\s\S]*?)\}")
        .expect("interface pattern is valid")
});

/// Static instance of the TypeScript extractor for registry.
pub static TYPESCRIPT_EXTRACTOR: TypeScriptExtractor = TypeScriptExtractor;

/// TypeScript extractor implementing the Extractor trait.
pub struct TypeScriptExtractor;

impl Extractor for TypeScriptExtractor {
    fn dialect(&self) -> &'static str {
        "typescript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["ts"]
    }

    fn extract(&self, source: &str) -> Result<Ir, ExtractError> {
        extract_typescript(source)
    }
}

/// Extract the first interface declared in TypeScript `source`.
pub fn extract_typescript(source: &str) -> Result<Ir, ExtractError> {
    let caps = INTERFACE_RE
        .captures(source)
        .ok_or_else(|| ExtractError::Parse("TypeScript interface".into()))?;
    let (Some(name), Some(body)) = (caps.get(1), caps.get(2)) else {
        return Err(ExtractError::Parse("TypeScript interface".into()));
    };

    let mut ir = Ir::new(name.as_str());
    for member in split_members(body.as_str()) {
        if let Some((name, ty)) = parse_member(member) {
            ir.push(name, ty);
        }
    }
    Ok(ir)
}

/// Split an interface body on newlines, `;` and `,` outside of brackets.
fn split_members(body: &str) -> Vec<&str> {
    let mut members = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '\n' | ';' | ',' if depth == 0 => {
                members.push(&body[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    members.push(&body[start..]);
    members
}

fn parse_member(member: &str) -> Option<(&str, &str)> {
    let line = member.trim();
    let is_comment = line.starts_with("//") || line.starts_with("/*") || line.starts_with('*');
    if line.is_empty() || is_comment {
        return None;
    }
    let (name, ty) = line.split_once(':')?;
    let name = name.trim();
    let name = name.strip_prefix("readonly ").unwrap_or(name).trim();
    let name = name.strip_suffix('?').unwrap_or(name).trim_end();
    let ty = ty.trim().trim_end_matches([';', ',']).trim_end();
    if name.is_empty() || ty.is_empty() || name.contains('(') {
        return None;
    }
    Some((name, ty))
}
