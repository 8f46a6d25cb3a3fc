use thiserror::Error;

use crate::catalog::MappingKind;

/// A code was not found in a lookup table that has no fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("code '{code}' not found in mapping table {table}")]
pub struct MappingMissError {
    pub table: MappingKind,
    pub code: String,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate key '{key}' in mapping table {table}")]
    DuplicateMappingKey { table: MappingKind, key: String },
    #[error("summary schemas differ: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },
    #[error("unknown dataset kind: {0}")]
    UnknownDataset(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
