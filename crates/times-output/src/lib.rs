//! Output of TIMES summary tables: run directories and CSV files.

pub mod error;
pub mod run_dir;
pub mod writer;

pub use error::{OutputError, Result};
pub use run_dir::{RUN_DIR_FORMAT, create_run_dir, ensure_dir, run_dir_name, run_dir_path};
pub use writer::{WrittenSummary, render_csv, summary_path, write_summaries, write_summary};
