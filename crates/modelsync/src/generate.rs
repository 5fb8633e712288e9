//! One regeneration cycle: extract once, then map, render and write every target.
//!
//! Errors are contained: a definition that fails to extract aborts the cycle
//! before any output is touched, and a failing target is logged and skipped
//! without affecting the targets around it.

use crate::config::{Config, Target};
use modelsync_codegen::{ExtractError, Ir, RenderError, extract_file, map_ir, render, render_with_template};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("no definition found in {}", .0.display())]
    EmptyDefinition(PathBuf),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to read template {}: {source}", path.display())]
    TemplateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Whether an output file existed before it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
}

/// Result of generating a single target.
#[derive(Debug)]
pub struct TargetReport {
    pub language: String,
    pub output: PathBuf,
    pub result: Result<WriteOutcome, GenerateError>,
}

/// Per-target results of one cycle, in configuration order.
#[derive(Debug, Default)]
pub struct CycleReport {
    pub targets: Vec<TargetReport>,
}

impl CycleReport {
    pub fn succeeded(&self) -> usize {
        self.targets.iter().filter(|t| t.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.targets.len() - self.succeeded()
    }
}

/// Write `contents` to `path`, creating parent directories as needed.
///
/// The file is truncated and rewritten in place; the write is not atomic.
pub fn write_output(path: &Path, contents: &str) -> Result<WriteOutcome, GenerateError> {
    let write_err = |source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let outcome = if path.exists() {
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Created
    };
    std::fs::write(path, contents).map_err(write_err)?;

    match outcome {
        WriteOutcome::Overwritten => {
            tracing::info!("File exists, overwriting: {}", path.display())
        }
        WriteOutcome::Created => tracing::info!("Created new file: {}", path.display()),
    }
    Ok(outcome)
}

/// Map `ir` into the target's language and render it.
///
/// A configured `templatePath` takes precedence over the registered template.
pub fn render_target(ir: &Ir, target: &Target) -> Result<String, GenerateError> {
    let mapped = map_ir(ir, &target.language);
    match target.custom_template() {
        Some(path) => {
            let source = std::fs::read_to_string(path).map_err(|source| GenerateError::TemplateIo {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(render_with_template(&mapped, &target.language, &source)?)
        }
        None => Ok(render(&mapped, &target.language)?),
    }
}

fn generate_target(ir: &Ir, target: &Target) -> Result<WriteOutcome, GenerateError> {
    let source = render_target(ir, target)?;
    write_output(&target.output, &source)
}

/// Run one full cycle against a config snapshot.
///
/// Returns `Err` only when the definition itself could not be extracted; in
/// that case no output has been modified. Per-target failures are reported
/// in the returned [`CycleReport`].
pub fn run_cycle(config: &Config) -> Result<CycleReport, GenerateError> {
    let ir = extract_file(&config.watch_file)?;
    if ir.is_empty() {
        return Err(GenerateError::EmptyDefinition(config.watch_file.clone()));
    }

    tracing::debug!(
        name = %ir.name,
        fields = ir.fields.len(),
        "extracted {}",
        config.watch_file.display()
    );
    let duplicates = ir.duplicate_field_names();
    if !duplicates.is_empty() {
        tracing::warn!(
            "{} declares duplicate fields: {}",
            ir.name,
            duplicates.join(", ")
        );
    }

    let mut report = CycleReport::default();
    for target in &config.targets {
        let result = generate_target(&ir, target);
        match &result {
            Ok(_) => tracing::info!(
                "Generated code for {} and wrote to {}",
                target.language,
                target.output.display()
            ),
            Err(e) => tracing::error!(
                language = %target.language,
                output = %target.output.display(),
                "target failed: {}",
                e
            ),
        }
        report.targets.push(TargetReport {
            language: target.language.clone(),
            output: target.output.clone(),
            result,
        });
    }
    Ok(report)
}

/// Run a cycle, logging any failure instead of returning it.
pub fn regenerate(config: &Config) -> Option<CycleReport> {
    match run_cycle(config) {
        Ok(report) => {
            if report.failed() > 0 {
                tracing::warn!(
                    "{} of {} targets failed",
                    report.failed(),
                    report.targets.len()
                );
            }
            Some(report)
        }
        Err(e) => {
            tracing::error!("regeneration of {} failed: {}", config.watch_file.display(), e);
            None
        }
    }
}
