//! Library side of the results processor CLI: logging setup and run configuration.

pub mod config;
pub mod logging;
