//! Classification, aggregation, gap filling and reshaping of TIMES results.
//!
//! Raw dataset records flow through [`classify`] into decorated records,
//! are grouped by [`aggregate`] (optionally after [`fuel_switch`]
//! extraction), densified by [`gap_fill`] and reshaped by [`shape`].
//! [`pipeline`] wires the stages together for a whole run.

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod fuel_switch;
pub mod gap_fill;
pub mod pipeline;
pub mod shape;

pub use aggregate::aggregate;
pub use classify::{
    ClassifierRegistry, ClassifyContext, DatasetClassifier, classify, classify_dataset,
    default_registry,
};
pub use error::{CoreError, Result, UnresolvedCategory};
pub use fuel_switch::{extract_switching, is_switch};
pub use gap_fill::{fill_series, gap_fill};
pub use pipeline::{DatasetReport, SummaryRun, build_summaries, summarize_dataset};
pub use shape::{to_frame, to_long, to_wide};
