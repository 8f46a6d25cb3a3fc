//! Error and warning types for results processing.

use std::fmt;

use thiserror::Error;

use times_model::{CodeField, DatasetKind, MappingKind, MappingMissError, ModelError};

/// Fatal errors of the processing stages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A code has no entry in a lookup table without fallback.
    #[error("{dataset}: {source}")]
    MappingMiss {
        dataset: DatasetKind,
        #[source]
        source: MappingMissError,
    },

    /// A record lacks a code its classifier cannot do without.
    #[error("{dataset}: record for {scenario}/{year} has no '{}' code", .field.column())]
    MissingCode {
        dataset: DatasetKind,
        field: CodeField,
        scenario: String,
        year: i32,
    },

    /// No classifier is registered for a dataset.
    #[error("no classifier registered for dataset {0}")]
    NoClassifier(DatasetKind),

    /// A summary row reached gap filling without any year.
    #[error("summary row '{key}' has no values to fill")]
    EmptySeries { key: String },

    #[error(transparent)]
    Model(#[from] ModelError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    Frame { message: String },
}

impl CoreError {
    pub fn mapping_miss(dataset: DatasetKind, source: MappingMissError) -> Self {
        Self::MappingMiss { dataset, source }
    }

    /// Lookup table behind a mapping miss.
    pub fn missing_table(&self) -> Option<MappingKind> {
        match self {
            CoreError::MappingMiss { source, .. } => Some(source.table),
            _ => None,
        }
    }
}

impl From<polars::prelude::PolarsError> for CoreError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Frame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Records of a dataset that fell through to a default category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedCategory {
    pub dataset: DatasetKind,
    /// Output field that received the default.
    pub field: &'static str,
    /// Raw code that could not be resolved ("" when the code was absent).
    pub code: String,
    pub count: usize,
}

impl fmt::Display for UnresolvedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = if self.code.is_empty() {
            "<blank>"
        } else {
            self.code.as_str()
        };
        write!(
            f,
            "{}: {} left unresolved for code '{}' ({} records)",
            self.dataset, self.field, code, self.count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_miss_names_dataset_and_table() {
        let err = CoreError::mapping_miss(
            DatasetKind::Transport,
            MappingMissError {
                table: MappingKind::EnduseToSubsectorDetail,
                code: "Hovercraft".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "transport: code 'Hovercraft' not found in mapping table enduse→subsector_detail"
        );
        assert_eq!(
            err.missing_table(),
            Some(MappingKind::EnduseToSubsectorDetail)
        );
    }

    #[test]
    fn unresolved_display_marks_blank_codes() {
        let warning = UnresolvedCategory {
            dataset: DatasetKind::Emissions,
            field: "emis_type",
            code: String::new(),
            count: 3,
        };
        assert_eq!(
            warning.to_string(),
            "emissions: emis_type left unresolved for code '<blank>' (3 records)"
        );
    }
}
