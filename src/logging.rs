use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Mutex, Once};
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "money_tracker=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Log to stderr. Used by the one-shot commands.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
    });
}

/// Log to a file so the terminal UI is not overdrawn. Returns the error when
/// the log file cannot be created; the caller decides whether to go on
/// without logging.
pub fn init_tracing_to_file(path: &Path) -> io::Result<()> {
    let mut result = Ok(());
    TRACING_INIT.call_once(|| {
        result = open_log_file(path).map(|file| {
            fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        });
    });
    result
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_under_regular_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        assert!(open_log_file(&blocker.join("app.log")).is_err());
    }

    #[test]
    fn test_log_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("app.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
