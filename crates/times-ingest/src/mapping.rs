//! Loading the two-column lookup tables into a [`MappingCatalog`].

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use times_model::{MappingCatalog, MappingKind, MappingTable};

use crate::error::{IngestError, Result};

/// Loads one lookup table.
///
/// The first column is the key and the second the value; other columns are
/// ignored. Rows with a blank key are skipped.
pub fn load_mapping_table(path: &Path, kind: MappingKind) -> Result<MappingTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, &e))?;
    let headers = reader.headers().map_err(|e| csv_error(path, &e))?.clone();
    if headers.len() < 2 {
        return Err(IngestError::MissingColumn {
            column: "value".to_string(),
            path: path.to_path_buf(),
        });
    }

    let mut table = MappingTable::new(kind);
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, &e))?;
        let key = record.get(0).unwrap_or("").trim();
        if key.is_empty() {
            continue;
        }
        let value = record.get(1).unwrap_or("").trim();
        table
            .insert(key.to_string(), value.to_string())
            .map_err(|source| IngestError::Mapping {
                path: path.to_path_buf(),
                source,
            })?;
    }
    debug!(table = %kind, entries = table.len(), path = %path.display(), "loaded mapping table");
    Ok(table)
}

/// Loads every known lookup table from `dir`.
///
/// Optional tables that are absent are left out of the catalog.
pub fn load_mapping_catalog(dir: &Path) -> Result<MappingCatalog> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let mut catalog = MappingCatalog::new();
    for kind in MappingKind::ALL {
        let path = dir.join(kind.file_name());
        if !path.is_file() {
            if kind.is_required() {
                return Err(IngestError::MissingMappingTable { table: kind, path });
            }
            debug!(table = %kind, "optional mapping table not present");
            continue;
        }
        catalog.insert(load_mapping_table(&path, kind)?);
    }
    info!(tables = catalog.len(), dir = %dir.display(), "mapping catalog loaded");
    Ok(catalog)
}

fn csv_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_required_tables(dir: &Path) {
        for kind in MappingKind::ALL.into_iter().filter(MappingKind::is_required) {
            fs::write(dir.join(kind.file_name()), "key,value\nA,Alpha\n").unwrap();
        }
    }

    #[test]
    fn test_blank_keys_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tech.csv");
        fs::write(&path, "tech,technology\nECOAL,Coal\n,Orphan\n EGAS ,Gas\n").unwrap();

        let table = load_mapping_table(&path, MappingKind::TechToTechnology).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("EGAS"), Some("Gas"));
    }

    #[test]
    fn test_duplicate_key_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tech.csv");
        fs::write(&path, "tech,technology\nECOAL,Coal\nECOAL,Brown coal\n").unwrap();

        let result = load_mapping_table(&path, MappingKind::TechToTechnology);

        assert!(matches!(result, Err(IngestError::Mapping { .. })));
    }

    #[test]
    fn test_catalog_skips_optional_tables() {
        let dir = TempDir::new().unwrap();
        write_required_tables(dir.path());

        let catalog = load_mapping_catalog(dir.path()).unwrap();

        assert_eq!(catalog.len(), 6);
        assert!(!catalog.has(MappingKind::EmissionSector));
        assert_eq!(
            catalog.lookup(MappingKind::CommodityToEmisType, "A"),
            Some("Alpha")
        );
    }

    #[test]
    fn test_catalog_requires_core_tables() {
        let dir = TempDir::new().unwrap();
        write_required_tables(dir.path());
        fs::remove_file(dir.path().join(MappingKind::TechToTechnology.file_name())).unwrap();

        let result = load_mapping_catalog(dir.path());

        assert!(matches!(
            result,
            Err(IngestError::MissingMappingTable {
                table: MappingKind::TechToTechnology,
                ..
            })
        ));
    }
}
