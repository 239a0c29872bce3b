use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{self, LogSettings};

/// Filter from `ENCORE_LOG` when set and valid, else from the configured level.
pub fn build_filter(env_directives: Option<&str>, level: &str) -> EnvFilter {
    env_directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Where log lines go. The terminal belongs to the UI, so always a file.
pub fn log_path(settings: &LogSettings) -> Option<PathBuf> {
    settings.file.clone().or_else(config::default_log_path)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Logging is skipped when no file can be opened.
pub fn init(settings: &LogSettings) {
    let Some(path) = log_path(settings) else {
        eprintln!("encore: no log location (HOME unset), logging disabled");
        return;
    };
    let file = match open_log_file(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("encore: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let env = std::env::var("ENCORE_LOG").ok();
    let result = tracing_subscriber::registry()
        .with(build_filter(env.as_deref(), &settings.level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();

    if let Err(e) = result {
        eprintln!("encore: logging already initialised: {e}");
    }
}
