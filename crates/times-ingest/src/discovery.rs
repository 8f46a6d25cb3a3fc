//! Locating the export of each dataset in a results folder.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use times_model::DatasetKind;

use crate::error::{IngestError, Result};

/// Exports found in a results folder.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredDatasets {
    pub found: BTreeMap<DatasetKind, PathBuf>,
    pub missing: Vec<DatasetKind>,
}

/// Lists all CSV files in a directory, sorted by file name.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Matches each dataset to its export file.
///
/// `file_names` overrides the default file name of a dataset. Names are
/// compared case-insensitively.
pub fn discover_datasets(
    dir: &Path,
    file_names: &BTreeMap<DatasetKind, String>,
) -> Result<DiscoveredDatasets> {
    let files = list_csv_files(dir)?;
    let mut discovered = DiscoveredDatasets::default();
    for kind in DatasetKind::ALL {
        let expected = file_names
            .get(&kind)
            .map_or(kind.default_file_name(), String::as_str);
        let matched = files.iter().find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.eq_ignore_ascii_case(expected))
        });
        match matched {
            Some(path) => {
                debug!(dataset = %kind, path = %path.display(), "dataset export found");
                discovered.found.insert(kind, path.clone());
            }
            None => {
                warn!(dataset = %kind, expected, "dataset export not found, skipping");
                discovered.missing.push(kind);
            }
        }
    }
    Ok(discovered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_names_match_case_insensitively() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("fe_transport.csv"), "scenario\n").unwrap();
        fs::write(dir.path().join("CO2 emissions.csv"), "scenario\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let discovered = discover_datasets(dir.path(), &BTreeMap::new()).unwrap();

        assert_eq!(discovered.found.len(), 2);
        assert!(discovered.found.contains_key(&DatasetKind::Transport));
        assert!(discovered.found.contains_key(&DatasetKind::Emissions));
        assert_eq!(discovered.missing.len(), 8);
    }

    #[test]
    fn test_override_file_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("power_run7.csv"), "scenario\n").unwrap();
        let overrides = BTreeMap::from([(DatasetKind::Power, "power_run7.csv".to_string())]);

        let discovered = discover_datasets(dir.path(), &overrides).unwrap();

        assert_eq!(
            discovered.found.get(&DatasetKind::Power),
            Some(&dir.path().join("power_run7.csv"))
        );
    }

    #[test]
    fn test_missing_directory() {
        let result = list_csv_files(Path::new("/no/such/results"));
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }
}
