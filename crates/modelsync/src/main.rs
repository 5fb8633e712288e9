use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use modelsync::{Config, DEFAULT_CONFIG_PATH, Supervisor, regenerate, run_cycle};
use modelsync_codegen::{extractors, templates, type_map_for_language};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Watch a model definition and regenerate it in other languages
#[derive(Parser, Debug)]
#[command(name = "modelsync", version)]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Watch the definition and config files, regenerating on change (default)
    Watch {
        /// Run one cycle before waiting for changes
        #[arg(long)]
        generate_on_start: bool,
    },
    /// Run a single regeneration cycle and exit
    Generate,
    /// Write the default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
    /// List source dialects and target languages
    Languages,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .init();
}

fn watch(config_path: PathBuf, generate_on_start: bool) -> Result<()> {
    let config = Config::load_or_init(&config_path)?;
    for problem in config.validate() {
        tracing::warn!("config: {}", problem);
    }
    if generate_on_start {
        regenerate(&config);
    }
    let supervisor = Supervisor::new(&config_path, config)
        .with_context(|| format!("failed to start watching {}", config_path.display()))?;
    supervisor.run();
    Ok(())
}

fn generate(config_path: PathBuf) -> Result<()> {
    let config = Config::load(&config_path)?;
    let report = run_cycle(&config)?;
    if report.failed() > 0 {
        bail!(
            "{} of {} targets failed",
            report.failed(),
            report.targets.len()
        );
    }
    Ok(())
}

fn init(config_path: PathBuf, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    Config::default().save(&config_path)?;
    tracing::info!("Wrote default config to {}", config_path.display());
    Ok(())
}

fn languages() {
    println!("Source dialects:");
    for extractor in extractors() {
        let exts: Vec<String> = extractor
            .extensions()
            .iter()
            .map(|e| format!(".{e}"))
            .collect();
        println!("  {:<12} {}", extractor.dialect(), exts.join(", "));
    }
    println!("Target languages:");
    for template in templates() {
        let mapped = if type_map_for_language(template.language).is_some() {
            ""
        } else {
            " (no type map)"
        };
        println!("  {:<12} .{}{}", template.language, template.extension, mapped);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.unwrap_or(Command::Watch {
        generate_on_start: false,
    }) {
        Command::Watch { generate_on_start } => watch(cli.config, generate_on_start),
        Command::Generate => generate(cli.config),
        Command::Init { force } => init(cli.config, force),
        Command::Languages => {
            languages();
            Ok(())
        }
    }
}
