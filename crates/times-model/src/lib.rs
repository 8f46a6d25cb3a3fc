pub mod catalog;
pub mod dataset;
pub mod error;
pub mod key;
pub mod options;
pub mod record;
pub mod sectoral;
pub mod table;

pub use catalog::{MappingCatalog, MappingKind, MappingTable};
pub use dataset::{DatasetKind, SummaryKind, ValueField};
pub use error::{MappingMissError, ModelError, Result};
pub use key::{CategoryKey, KeyField, KeySchema};
pub use options::{OutputLayout, RunOptions};
pub use record::{ClassifiedRecord, CodeField, RawRecord, UNRESOLVED, is_unset};
pub use sectoral::sectoral_plan_sector;
pub use table::{LongRow, SummaryTable, YearSeries};
