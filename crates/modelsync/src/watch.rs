//! Change-driven regeneration.
//!
//! Two watch streams run side by side:
//!
//! - a [`DefinitionWatch`] thread that owns an immutable config snapshot and
//!   runs a regeneration cycle whenever the definition file is written;
//! - the [`Supervisor`], which watches the config file and, on change, stops
//!   the current definition watch (joining its thread) before starting a new
//!   one with the reloaded config.
//!
//! At most one definition watch is alive at any time, and a cycle never
//! observes a config that changes underneath it.

use crate::config::{Config, ConfigError};
use crate::generate::regenerate;
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

/// Quiet period that must pass after an event before reacting to it, so an
/// editor's truncate-then-write burst produces a single cycle.
const SETTLE_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("failed to watch {}: {source}", path.display())]
    Notify {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("cannot watch {}: path has no file name", .0.display())]
    InvalidPath(PathBuf),

    #[error("failed to spawn watch thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Messages delivered to a watch loop: filesystem events and the stop request
/// share one channel.
enum Signal {
    Fs(notify::Result<Event>),
    Stop,
}

/// Watch a single file by watching its parent directory.
///
/// Editors that save by writing a temp file and renaming it over the original
/// would otherwise silently detach a watch placed on the file itself.
fn watch_file(
    path: &Path,
    tx: Sender<Signal>,
) -> Result<(RecommendedWatcher, OsString), WatchError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| WatchError::InvalidPath(path.to_path_buf()))?
        .to_os_string();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let notify_err = |source| WatchError::Notify {
        path: path.to_path_buf(),
        source,
    };
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            let _ = tx.send(Signal::Fs(res));
        },
        notify::Config::default(),
    )
    .map_err(notify_err)?;
    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .map_err(notify_err)?;
    Ok((watcher, file_name))
}

/// True for create/modify/rename events touching `file_name`.
fn is_write_to(event: &Event, file_name: &OsStr) -> bool {
    let kind_matches = match event.kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    };
    kind_matches && event.paths.iter().any(|p| p.file_name() == Some(file_name))
}

/// Wait for the event stream to go quiet. Returns false if asked to stop.
fn settle(rx: &Receiver<Signal>) -> bool {
    loop {
        match rx.recv_timeout(SETTLE_DELAY) {
            Ok(Signal::Fs(_)) => continue,
            Ok(Signal::Stop) | Err(RecvTimeoutError::Disconnected) => return false,
            Err(RecvTimeoutError::Timeout) => return true,
        }
    }
}

/// Block until the next write to `file_name`. Returns false on stop.
fn wait_for_write(rx: &Receiver<Signal>, file_name: &OsStr, what: &str) -> bool {
    loop {
        match rx.recv() {
            Ok(Signal::Fs(Ok(event))) => {
                if is_write_to(&event, file_name) {
                    tracing::info!("File changed: {}", Path::new(file_name).display());
                    return settle(rx);
                }
            }
            Ok(Signal::Fs(Err(e))) => tracing::warn!("{} watch error: {}", what, e),
            Ok(Signal::Stop) | Err(_) => return false,
        }
    }
}

/// A running watch on the definition file of one config snapshot.
pub struct DefinitionWatch {
    config: Arc<Config>,
    tx: Sender<Signal>,
    handle: Option<JoinHandle<()>>,
}

impl DefinitionWatch {
    /// Start watching `config.watch_file` on a dedicated thread.
    pub fn spawn(config: Arc<Config>) -> Result<Self, WatchError> {
        let (tx, rx) = mpsc::channel();
        let (watcher, file_name) = watch_file(&config.watch_file, tx.clone())?;

        let snapshot = Arc::clone(&config);
        let handle = std::thread::Builder::new()
            .name("definition-watch".into())
            .spawn(move || {
                // Dropping the watcher at loop exit unregisters it.
                let _watcher = watcher;
                while wait_for_write(&rx, &file_name, "definition") {
                    regenerate(&snapshot);
                }
                tracing::debug!("definition watch on {} stopped", snapshot.watch_file.display());
            })
            .map_err(WatchError::Spawn)?;

        tracing::info!("Watching {}", config.watch_file.display());
        Ok(Self {
            config,
            tx,
            handle: Some(handle),
        })
    }

    /// The config snapshot this watch regenerates with.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Stop the watch and wait for its thread to exit.
    ///
    /// A cycle that is already running is allowed to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.tx.send(Signal::Stop);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("definition watch thread panicked");
            }
        }
    }
}

impl Drop for DefinitionWatch {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Handle for stopping a running [`Supervisor`] from another thread.
#[derive(Clone)]
pub struct StopHandle(Sender<Signal>);

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.0.send(Signal::Stop);
    }
}

/// Watches the config file and keeps exactly one [`DefinitionWatch`] running
/// for the most recently loaded config.
pub struct Supervisor {
    config_path: PathBuf,
    config_file: OsString,
    active: Option<DefinitionWatch>,
    tx: Sender<Signal>,
    rx: Receiver<Signal>,
    _watcher: RecommendedWatcher,
}

impl Supervisor {
    /// Start watching `config_path` and the definition file named by `config`.
    pub fn new(config_path: impl Into<PathBuf>, config: Config) -> Result<Self, WatchError> {
        let config_path = config_path.into();
        let (tx, rx) = mpsc::channel();
        let (watcher, config_file) = watch_file(&config_path, tx.clone())?;
        let active = Some(DefinitionWatch::spawn(Arc::new(config))?);
        tracing::info!("Watching config {}", config_path.display());
        Ok(Self {
            config_path,
            config_file,
            active,
            tx,
            rx,
            _watcher: watcher,
        })
    }

    /// The config snapshot of the active definition watch, if any.
    pub fn config(&self) -> Option<&Arc<Config>> {
        self.active.as_ref().map(DefinitionWatch::config)
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.tx.clone())
    }

    /// Reload the config and restart the definition watch with it.
    ///
    /// If the new config cannot be loaded the current watch keeps running.
    /// If the new watch cannot be started, no definition watch is left active
    /// until the next successful reload.
    pub fn reload(&mut self) -> Result<(), WatchError> {
        let config = Config::load(&self.config_path)?;
        for problem in config.validate() {
            tracing::warn!("config: {}", problem);
        }
        tracing::info!("Config reloaded, restarting definition watch");

        if let Some(previous) = self.active.take() {
            previous.stop();
        }
        self.active = Some(DefinitionWatch::spawn(Arc::new(config))?);
        Ok(())
    }

    /// React to config changes until [`StopHandle::stop`] is called.
    pub fn run(mut self) {
        while wait_for_write(&self.rx, &self.config_file, "config") {
            if let Err(e) = self.reload() {
                tracing::error!("config reload failed: {}", e);
            }
        }
        if let Some(active) = self.active.take() {
            active.stop();
        }
    }
}
