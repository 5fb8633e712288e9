//! Keep generated models in sync with a source definition.
//!
//! `modelsync` wires [`modelsync_codegen`] into a long-running process: it
//! watches one definition file and a JSON config, and re-generates every
//! configured target whenever either changes.
//!
//! ```ignore
//! use modelsync::{Config, Supervisor};
//!
//! let config = Config::load_or_init("config.json".as_ref())?;
//! Supervisor::new("config.json", config)?.run();
//! ```

pub mod config;
pub mod generate;
pub mod watch;

pub use config::{Config, ConfigError, DEFAULT_CONFIG_PATH, Target};
pub use generate::{
    CycleReport, GenerateError, TargetReport, WriteOutcome, regenerate, render_target, run_cycle,
    write_output,
};
pub use watch::{DefinitionWatch, StopHandle, Supervisor, WatchError};
