//! Go struct extraction.
//!
//! Parses Go source with tree-sitter and extracts the first struct type
//! declaration into the IR.

use crate::ir::{Ir, UNKNOWN_TYPE};
use crate::traits::{ExtractError, Extractor};
use tree_sitter::{Node, Parser};

/// Static instance of the Go extractor for registry.
pub static GO_EXTRACTOR: GoExtractor = GoExtractor;

/// Go extractor implementing the Extractor trait.
pub struct GoExtractor;

impl Extractor for GoExtractor {
    fn dialect(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn extract(&self, source: &str) -> Result<Ir, ExtractError> {
        extract_go(source)
    }
}

/// Extract the first struct declared in Go `source`.
///
/// A file without any struct declaration yields an empty [`Ir`] rather than
/// an error. Syntax errors are reported as parse errors.
pub fn extract_go(source: &str) -> Result<Ir, ExtractError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| ExtractError::Parse(format!("Go source: tree-sitter init: {}", e)))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ExtractError::Parse("Go source".into()))?;

    let root = tree.root_node();
    if root.has_error() {
        let line = first_error(root).map(|n| n.start_position().row + 1).unwrap_or(1);
        return Err(ExtractError::Parse(format!(
            "Go source: syntax error at line {}",
            line
        )));
    }

    let ctx = ExtractContext { source };
    Ok(ctx.find_struct(root).unwrap_or_default())
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error() || c.is_missing())
        .find_map(first_error)
}

struct ExtractContext<'a> {
    source: &'a str,
}

impl<'a> ExtractContext<'a> {
    fn node_text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Depth-first, document-order search for the first struct type spec.
    fn find_struct(&self, node: Node) -> Option<Ir> {
        if matches!(node.kind(), "type_spec" | "type_alias") {
            if let Some(ir) = self.extract_type_spec(node) {
                return Some(ir);
            }
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        children.into_iter().find_map(|child| self.find_struct(child))
    }

    fn extract_type_spec(&self, spec: Node) -> Option<Ir> {
        let ty = spec.child_by_field_name("type")?;
        if ty.kind() != "struct_type" {
            return None;
        }
        let name = spec.child_by_field_name("name")?;
        let mut ir = Ir::new(self.node_text(name));

        let mut cursor = ty.walk();
        let lists: Vec<Node> = ty
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "field_declaration_list")
            .collect();
        for list in lists {
            let mut cursor = list.walk();
            for decl in list.named_children(&mut cursor) {
                if decl.kind() == "field_declaration" {
                    self.extract_field_declaration(decl, &mut ir);
                }
            }
        }
        Some(ir)
    }

    /// `a, b int` produces two fields; embedded fields have no name and are skipped.
    fn extract_field_declaration(&self, decl: Node, ir: &mut Ir) {
        let ty = decl
            .child_by_field_name("type")
            .map(|t| self.render_type(t))
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string());

        let mut cursor = decl.walk();
        for name in decl.children_by_field_name("name", &mut cursor) {
            ir.push(self.node_text(name), ty.clone());
        }
    }

    fn render_type(&self, node: Node) -> String {
        match node.kind() {
            "type_identifier" => self.node_text(node).to_string(),
            "slice_type" | "array_type" => match node.child_by_field_name("element") {
                Some(elem) => format!("[]{}", self.render_type(elem)),
                None => UNKNOWN_TYPE.to_string(),
            },
            "pointer_type" => {
                let mut cursor = node.walk();
                let pointee = node.named_children(&mut cursor).next();
                match pointee {
                    Some(inner) => format!("*{}", self.render_type(inner)),
                    None => UNKNOWN_TYPE.to_string(),
                }
            }
            _ => UNKNOWN_TYPE.to_string(),
        }
    }
}
