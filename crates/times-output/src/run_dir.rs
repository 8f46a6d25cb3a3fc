//! Timestamped run directories.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use tracing::debug;

use crate::error::{OutputError, Result};

/// Directory name format of a run, to the minute.
pub const RUN_DIR_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// Name of the run directory for a point in time.
pub fn run_dir_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(RUN_DIR_FORMAT).to_string()
}

/// Path of the run directory under `base` for the current local time.
pub fn run_dir_path(base: &Path) -> PathBuf {
    base.join(run_dir_name(&Local::now()))
}

/// Creates `dir` and its parents; an existing directory is reused.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!(path = %dir.display(), "output directory ready");
    Ok(())
}

/// Creates the run directory for the current local time under `base`.
pub fn create_run_dir(base: &Path) -> Result<PathBuf> {
    let dir = run_dir_path(base);
    ensure_dir(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn name_is_minute_resolution() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 59).unwrap();
        assert_eq!(run_dir_name(&at), "2025-03-07_09-05");
    }

    #[test]
    fn run_dir_is_created_under_base() {
        let base = TempDir::new().unwrap();

        let dir = create_run_dir(&base.path().join("results")).unwrap();

        assert!(dir.is_dir());
        assert!(dir.starts_with(base.path()));
        // A second run in the same minute reuses the directory.
        ensure_dir(&dir).unwrap();
    }
}
