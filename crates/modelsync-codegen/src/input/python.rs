//! Python class extraction.
//!
//! Python carries no lexical types for instance attributes, so fields are
//! discovered by convention: every `self.<name> = ...` assignment in the
//! body of `__init__`. All extracted fields are typed as unknown.

use crate::ir::{Field, Ir};
use crate::traits::{ExtractError, Extractor};
use regex::Regex;
use std::sync::LazyLock;

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)class\s+(\w+)[^:\n]*:").expect("class pattern is valid")
});

/// Group 1 is the `def` indentation, group 2 any statement after the colon.
static INIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^([ \t]*)def\s+__init__\s*\(\s*self\b[\s\S]*?\)\s*(?:->\s*[^:\n]+)?:[ \t]*(.*)$",
    )
    .expect("__init__ pattern is valid")
});

/// Static instance of the Python extractor for registry.
pub static PYTHON_EXTRACTOR: PythonExtractor = PythonExtractor;

/// Python extractor implementing the Extractor trait.
pub struct PythonExtractor;

impl Extractor for PythonExtractor {
    fn dialect(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn extract(&self, source: &str) -> Result<Ir, ExtractError> {
        extract_python(source)
    }
}

/// Extract the first class with an `__init__` method from Python `source`.
///
/// Classes without an `__init__` of their own (bases, mixins, enums) are
/// skipped; the name and fields always come from the same class.
pub fn extract_python(source: &str) -> Result<Ir, ExtractError> {
    for class in CLASS_RE.captures_iter(source) {
        let (Some(header), Some(name)) = (class.get(0), class.get(2)) else {
            continue;
        };
        let class_indent = class.get(1).map_or(0, |m| indent_width(m.as_str()));
        let rest = &source[header.end()..];
        let body = &rest[..block_len(rest, class_indent)];

        let Some(init) = INIT_RE.captures(body) else {
            continue;
        };
        let def_indent = init.get(1).map_or(0, |m| indent_width(m.as_str()));
        let inline = init.get(2).map_or("", |m| m.as_str());
        let body_start = init.get(0).map_or(0, |m| m.end());

        let mut ir = Ir::new(name.as_str());
        let lines = std::iter::once(inline).chain(method_body(&body[body_start..], def_indent));
        for statement in lines.flat_map(|line| line.split(';')) {
            if let Some(field) = parse_assignment(statement) {
                ir.fields.push(Field::untyped(field));
            }
        }
        return Ok(ir);
    }
    Err(ExtractError::Parse("Python class".into()))
}

fn indent_width(s: &str) -> usize {
    s.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Byte length of the block that follows a header line: the rest of the
/// header line plus every line indented deeper than `header_indent`.
fn block_len(after_header: &str, header_indent: usize) -> usize {
    let mut len = 0;
    for (i, line) in after_header.split_inclusive('\n').enumerate() {
        let blank = line.trim().is_empty();
        if i > 0 && !blank && indent_width(line) <= header_indent {
            break;
        }
        len += line.len();
    }
    len
}

/// Lines indented deeper than the `def`, up to the first dedent.
fn method_body(after_def: &str, def_indent: usize) -> Vec<&str> {
    after_def
        .lines()
        .skip(1) // remainder of the `def` line
        .filter(|line| !line.trim().is_empty())
        .take_while(|line| indent_width(line) > def_indent)
        .collect()
}

/// `self.name = ...` or `self.name: T = ...` yields `name`.
fn parse_assignment(line: &str) -> Option<&str> {
    let line = line.trim();
    let target = line.strip_prefix("self.")?;
    let (lhs, rhs) = target.split_once('=')?;
    if rhs.starts_with('=') {
        return None;
    }
    if lhs.ends_with(['+', '-', '*', '/', '%', '&', '|', '^', '<', '>', '!', '@']) {
        return None;
    }
    let name = lhs.split(':').next().unwrap_or(lhs).trim();
    let is_ident = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    is_ident.then_some(name)
}
