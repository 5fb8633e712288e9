//! Built-in Tera templates, keyed by target language.
//!
//! Every template renders against the serialized [`Ir`](crate::ir::Ir):
//! `{ name, fields: [{ name, type }] }`. Field types are already mapped for
//! the language by the time a template sees them.

use std::sync::{OnceLock, RwLock};

/// A code template for one target language.
#[derive(Debug)]
pub struct Template {
    pub language: &'static str,
    /// Conventional file extension for the output (e.g., "hpp").
    pub extension: &'static str,
    pub source: &'static str,
}

pub static TYPESCRIPT_TEMPLATE: Template = Template {
    language: "typescript",
    extension: "ts",
    source: r#"// Auto-generated TypeScript interface
export interface {{ name }} {
{% for field in fields %}    {{ field.name }}: {{ field.type }};
{% endfor %}}
"#,
};

pub static CSHARP_TEMPLATE: Template = Template {
    language: "csharp",
    extension: "cs",
    source: r#"// Auto-generated C# class
public class {{ name }} {
{% for field in fields %}    public {{ field.type }} {{ field.name }} { get; set; }
{% endfor %}}
"#,
};

pub static CPP_TEMPLATE: Template = Template {
    language: "cpp",
    extension: "hpp",
    source: r#"// Auto-generated C++ struct
struct {{ name }} {
{% for field in fields %}    {{ field.type }} {{ field.name }};
{% endfor %}};
"#,
};

pub static PYTHON_TEMPLATE: Template = Template {
    language: "python",
    extension: "py",
    source: r#"# Auto-generated Python class
class {{ name }}:
    def __init__(self):
{% for field in fields %}        self.{{ field.name }}: {{ field.type }} = None
{% endfor %}{% if fields | length == 0 %}        pass
{% endif %}"#,
};

pub static JAVA_TEMPLATE: Template = Template {
    language: "java",
    extension: "java",
    source: r#"// Auto-generated Java class
public class {{ name }} {
{% for field in fields %}
    private {{ field.type }} {{ field.name }};

    public {{ field.type }} get{{ field.name | title }}() {
        return {{ field.name }};
    }

    public void set{{ field.name | title }}({{ field.type }} {{ field.name }}) {
        this.{{ field.name }} = {{ field.name }};
    }
{% endfor %}}
"#,
};

static TEMPLATES: RwLock<Vec<&'static Template>> = RwLock::new(Vec::new());
static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a template for an additional language.
pub fn register_template(template: &'static Template) {
    TEMPLATES.write().unwrap().push(template);
}

fn init_builtin() {
    INITIALIZED.get_or_init(|| {
        let mut templates = TEMPLATES.write().unwrap();
        templates.push(&TYPESCRIPT_TEMPLATE);
        templates.push(&CSHARP_TEMPLATE);
        templates.push(&CPP_TEMPLATE);
        templates.push(&PYTHON_TEMPLATE);
        templates.push(&JAVA_TEMPLATE);
    });
}

/// Get the template registered for a language.
pub fn template_for_language(language: &str) -> Option<&'static Template> {
    init_builtin();
    TEMPLATES
        .read()
        .unwrap()
        .iter()
        .find(|t| t.language == language)
        .copied()
}

/// List all registered templates.
pub fn templates() -> Vec<&'static Template> {
    init_builtin();
    TEMPLATES.read().unwrap().clone()
}

/// List all languages with a registered template.
pub fn languages() -> Vec<&'static str> {
    init_builtin();
    TEMPLATES.read().unwrap().iter().map(|t| t.language).collect()
}
