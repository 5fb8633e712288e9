//! End-to-end cycles: definition file on disk in, generated files on disk out.

use modelsync::{Config, GenerateError, Target, WriteOutcome, run_cycle};
use modelsync_codegen::ExtractError;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const BOOK_TS: &str = "interface Book { title: string; pages: int; }\n";

fn config(watch_file: &Path, targets: Vec<Target>) -> Config {
    Config {
        watch_file: watch_file.to_path_buf(),
        targets,
    }
}

#[test]
fn typescript_to_cpp() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("Book.ts");
    fs::write(&source, BOOK_TS).unwrap();
    let output = dir.path().join("generated/Book.hpp");

    let report = run_cycle(&config(&source, vec![Target::new("cpp", &output)])).unwrap();
    assert_eq!(report.succeeded(), 1);

    let generated = fs::read_to_string(&output).unwrap();
    assert!(generated.contains("struct Book"));
    let title = generated.find("std::string title;").unwrap();
    let pages = generated.find("int pages;").unwrap();
    assert!(title < pages);
}

#[test]
fn typescript_to_java() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("Book.ts");
    fs::write(&source, BOOK_TS).unwrap();
    let output = dir.path().join("Book.java");

    run_cycle(&config(&source, vec![Target::new("java", &output)])).unwrap();

    let generated = fs::read_to_string(&output).unwrap();
    for expected in [
        "public class Book",
        "private String title;",
        "private int pages;",
        "public String getTitle()",
        "public void setTitle(String title)",
        "public int getPages()",
        "public void setPages(int pages)",
    ] {
        assert!(generated.contains(expected), "missing {expected:?} in:\n{generated}");
    }
}

#[test]
fn second_cycle_overwrites() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("Book.ts");
    fs::write(&source, BOOK_TS).unwrap();
    let output = dir.path().join("Book.hpp");
    let config = config(&source, vec![Target::new("cpp", &output)]);

    let first = run_cycle(&config).unwrap();
    assert!(matches!(first.targets[0].result, Ok(WriteOutcome::Created)));

    fs::write(&source, "interface Book { title: string; isbn: string; }\n").unwrap();
    let second = run_cycle(&config).unwrap();
    assert!(matches!(second.targets[0].result, Ok(WriteOutcome::Overwritten)));

    let generated = fs::read_to_string(&output).unwrap();
    assert!(generated.contains("std::string isbn;"));
    assert!(!generated.contains("pages"));
}

#[test]
fn unknown_language_does_not_block_other_targets() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("Book.ts");
    fs::write(&source, BOOK_TS).unwrap();
    let cobol = dir.path().join("Book.cbl");
    let cpp = dir.path().join("Book.hpp");

    let report = run_cycle(&config(
        &source,
        vec![Target::new("cobol", &cobol), Target::new("cpp", &cpp)],
    ))
    .unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
    assert!(matches!(
        report.targets[0].result,
        Err(GenerateError::Render(_))
    ));
    assert!(!cobol.exists());
    assert!(cpp.exists());
}

#[test]
fn missing_definition_touches_nothing() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("Book.hpp");
    fs::write(&output, "previous").unwrap();

    let err = run_cycle(&config(
        &dir.path().join("Book.ts"),
        vec![Target::new("cpp", &output)],
    ))
    .unwrap_err();

    assert!(matches!(err, GenerateError::Extract(ExtractError::Io { .. })));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
}

#[test]
fn unsupported_dialect_touches_nothing() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("book.rb");
    fs::write(&source, "class Book; end\n").unwrap();
    let output = dir.path().join("Book.hpp");

    let err = run_cycle(&config(&source, vec![Target::new("cpp", &output)])).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Extract(ExtractError::UnsupportedDialect(_))
    ));
    assert!(!output.exists());
}

#[test]
fn go_to_csharp() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("book.go");
    fs::write(
        &source,
        "package models\n\ntype Book struct {\n\tTitle string\n\tPages int\n\tRating float64\n}\n",
    )
    .unwrap();
    let output = dir.path().join("Book.cs");

    run_cycle(&config(&source, vec![Target::new("csharp", &output)])).unwrap();

    let generated = fs::read_to_string(&output).unwrap();
    assert!(generated.contains("public class Book"));
    assert!(generated.contains("public string Title { get; set; }"));
    assert!(generated.contains("public int Pages { get; set; }"));
    assert!(generated.contains("public double Rating { get; set; }"));
}

#[test]
fn python_to_typescript_keeps_unknown_types() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("book.py");
    fs::write(
        &source,
        "class Book:\n    def __init__(self, title, pages):\n        self.title = title\n        self.pages = pages\n",
    )
    .unwrap();
    let output = dir.path().join("book.ts");

    run_cycle(&config(&source, vec![Target::new("typescript", &output)])).unwrap();

    let generated = fs::read_to_string(&output).unwrap();
    assert!(generated.contains("export interface Book"));
    assert!(generated.contains("title: unknown;"));
    assert!(generated.contains("pages: unknown;"));
}

#[test]
fn custom_template_path() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("Book.ts");
    fs::write(&source, BOOK_TS).unwrap();
    let template = dir.path().join("names.tera");
    fs::write(&template, "{% for f in fields %}{{ f.name }}\n{% endfor %}").unwrap();
    let output = dir.path().join("names.txt");

    let target = Target {
        template_path: Some(template),
        ..Target::new("cpp", &output)
    };
    run_cycle(&config(&source, vec![target])).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "title\npages\n");
}

#[test]
fn python_base_class_is_skipped() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("book.py");
    fs::write(
        &source,
        "class Base:\n    pass\n\nclass Book(Base):\n    def __init__(self):\n        self.title = ''\n",
    )
    .unwrap();
    let output = dir.path().join("Book.hpp");

    run_cycle(&config(&source, vec![Target::new("cpp", &output)])).unwrap();

    let generated = fs::read_to_string(&output).unwrap();
    assert!(generated.contains("struct Book {"));
    assert!(!generated.contains("Base"));
    assert!(generated.contains("unknown title;"));
}
