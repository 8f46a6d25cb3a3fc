//! Results ingestion: report exports, lookup tables and dataset discovery.

pub mod cells;
pub mod discovery;
pub mod error;
pub mod mapping;
pub mod reader;

pub use discovery::{DiscoveredDatasets, discover_datasets, list_csv_files};
pub use error::{IngestError, Result};
pub use mapping::{load_mapping_catalog, load_mapping_table};
pub use reader::{read_dataset, read_export_frame, records_from_frame};
