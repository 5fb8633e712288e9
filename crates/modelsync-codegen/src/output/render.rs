//! Template rendering.

use super::templates::template_for_language;
use crate::ir::Ir;
use crate::typemap::map_ir;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

/// Error that can occur while rendering an IR through a template.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template for language {0} not found")]
    TemplateNotFound(String),

    #[error("template {name} failed: {}", describe(.source))]
    Template {
        name: String,
        #[source]
        source: tera::Error,
    },
}

/// Tera errors keep the useful detail in their cause chain.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut cause = std::error::Error::source(err);
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = std::error::Error::source(inner);
    }
    message
}

/// Render `ir` with the template registered for `language`.
///
/// The IR is expected to already carry the language's type spellings
/// (see [`map_ir`](crate::typemap::map_ir)).
pub fn render(ir: &Ir, language: &str) -> Result<String, RenderError> {
    let template = template_for_language(language)
        .ok_or_else(|| RenderError::TemplateNotFound(language.to_string()))?;
    render_with_template(ir, language, template.source)
}

/// Map types for `language` and render with its registered template.
pub fn generate(ir: &Ir, language: &str) -> Result<String, RenderError> {
    render(&map_ir(ir, language), language)
}

/// Render `ir` with an ad-hoc template source, e.g. one loaded from disk.
pub fn render_with_template(ir: &Ir, name: &str, source: &str) -> Result<String, RenderError> {
    let wrap = |source| RenderError::Template {
        name: name.to_string(),
        source,
    };

    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.register_filter("title", title_filter);
    tera.add_raw_template(name, source).map_err(wrap)?;

    let context = Context::from_serialize(ir).map_err(wrap)?;
    tera.render(name, &context).map_err(wrap)
}

fn title_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = tera::try_get_value!("title", "value", String, value);
    Ok(Value::String(title_case(&s)))
}

/// Uppercase the first letter of every word, leaving all other characters
/// as they are (`firstName` -> `FirstName`, `first_name` -> `First_name`).
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if in_word {
            out.push(c);
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphanumeric() || c == '_';
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Ir {
        Ir::new("Book")
            .with_field("title", "string")
            .with_field("pages", "int")
    }

    fn render_for(ir: &Ir, language: &str) -> String {
        generate(ir, language).unwrap()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("title"), "Title");
        assert_eq!(title_case("firstName"), "FirstName");
        assert_eq!(title_case("first_name"), "First_name");
        assert_eq!(title_case("two words"), "Two Words");
        assert_eq!(title_case("Already"), "Already");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_render_cpp() {
        insta::assert_snapshot!(render_for(&book(), "cpp"), @r"
        // Auto-generated C++ struct
        struct Book {
            std::string title;
            int pages;
        };
        ");
    }

    #[test]
    fn test_render_typescript() {
        insta::assert_snapshot!(render_for(&book(), "typescript"), @r"
        // Auto-generated TypeScript interface
        export interface Book {
            title: string;
            pages: number;
        }
        ");
    }

    #[test]
    fn test_render_csharp() {
        let out = render_for(&book(), "csharp");
        assert!(out.contains("public class Book {"));
        assert!(out.contains("    public string title { get; set; }"));
        assert!(out.contains("    public int pages { get; set; }"));
    }

    #[test]
    fn test_render_python() {
        let out = render_for(&book(), "python");
        assert!(out.contains("class Book:\n    def __init__(self):\n"));
        assert!(out.contains("        self.title: str = None\n"));
        assert!(out.contains("        self.pages: int = None\n"));
        assert!(!out.contains("pass"));

        let empty = render_for(&Ir::new("Empty"), "python");
        assert!(empty.ends_with("def __init__(self):\n        pass\n"));
    }

    #[test]
    fn test_render_java_accessors() {
        let out = render_for(&book(), "java");
        assert!(out.contains("public class Book {"));
        assert!(out.contains("private String title;"));
        assert!(out.contains("private int pages;"));
        assert!(out.contains("public String getTitle() {"));
        assert!(out.contains("public void setTitle(String title) {"));
        assert!(out.contains("this.title = title;"));
        assert!(out.contains("public int getPages() {"));
        assert!(out.contains("public void setPages(int pages) {"));
        assert!(out.find("getTitle").unwrap() < out.find("getPages").unwrap());
    }

    #[test]
    fn test_title_does_not_alter_declarations() {
        let ir = Ir::new("User").with_field("firstName", "string");
        let out = render_for(&ir, "java");
        assert!(out.contains("private String firstName;"));
        assert!(out.contains("getFirstName()"));
    }

    #[test]
    fn test_fields_render_in_order_with_duplicates() {
        let ir = Ir::new("D")
            .with_field("b", "int")
            .with_field("a", "int")
            .with_field("b", "bool");
        let out = render_for(&ir, "cpp");
        let lines: Vec<&str> = out.lines().map(str::trim).collect();
        assert_eq!(
            &lines[2..5],
            &["int b;", "int a;", "bool b;"]
        );
    }

    #[test]
    fn test_unknown_language() {
        let err = render(&book(), "cobol").unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound(ref l) if l == "cobol"));
        assert_eq!(err.to_string(), "template for language cobol not found");
    }

    #[test]
    fn test_custom_template() {
        let out = render_with_template(
            &book(),
            "custom",
            "{{ name }}:{% for f in fields %} {{ f.name | title }}={{ f.type }}{% endfor %}",
        )
        .unwrap();
        assert_eq!(out, "Book: Title=string Pages=int");
    }

    #[test]
    fn test_custom_template_syntax_error() {
        let err = render_with_template(&book(), "broken", "{% for f in fields %}").unwrap_err();
        assert!(matches!(err, RenderError::Template { ref name, .. } if name == "broken"));
    }
}
