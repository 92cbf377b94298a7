use std::fs::{create_dir_all, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "QUILL_LOG";
const DEFAULT_FILTER: &str = "quill_core=info,quill=info";

/// Routes `tracing` output to a per-session file so it never draws over the
/// terminal UI. Returns the file path, or `None` when logging is disabled.
pub fn init_session_logging() -> Option<PathBuf> {
    let dir = log_dir()?;
    let (path, file) = open_session_file(&dir)?;

    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok()?;

    Some(path)
}

fn log_dir() -> Option<PathBuf> {
    let base = dirs::data_dir().or_else(|| std::env::current_dir().ok())?;
    Some(base.join("quill").join("logs"))
}

fn open_session_file(dir: &Path) -> Option<(PathBuf, File)> {
    create_dir_all(dir).ok()?;
    let path = dir.join(format!("session-{}.log", now_millis()));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;
    Some((path, file))
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn session_file_is_created_under_nested_dir() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("quill").join("logs");

        let (path, _file) = open_session_file(&dir).unwrap();
        assert!(path.exists());
        assert!(path.starts_with(&dir));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("session-"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn unwritable_location_disables_logging() {
        let tmp = tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        assert!(open_session_file(&blocker.join("logs")).is_none());
    }
}
