//! Run configuration loaded from TOML.
//!
//! ```toml
//! mappings = "../mappings"
//!
//! [options]
//! split_by_state = false
//! layout = "long"
//!
//! [inputs]
//! emissions = "CO2 emissions v2.csv"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use times_model::{DatasetKind, OutputLayout, RunOptions};

/// Contents of a run configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub options: RunOptions,
    /// Export file names by dataset, replacing the defaults.
    pub inputs: BTreeMap<String, String>,
    /// Mapping table folder, relative to the config file.
    pub mappings: Option<PathBuf>,
}

/// Option flags given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionFlags {
    pub no_states: bool,
    pub sectoral_plans: bool,
    pub layout: Option<OutputLayout>,
    pub power_unit_conversion: bool,
}

impl RunConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse run configuration")
    }

    /// Loads a config file; a relative `mappings` path is resolved against it.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let mut config =
            Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))?;
        config.mappings = config.mappings.take().map(|mappings| match path.parent() {
            Some(parent) if mappings.is_relative() => parent.join(mappings),
            _ => mappings,
        });
        Ok(config)
    }

    /// Input file overrides keyed by dataset kind.
    pub fn input_overrides(&self) -> Result<BTreeMap<DatasetKind, String>> {
        self.inputs
            .iter()
            .map(|(name, file)| {
                let kind: DatasetKind = name
                    .parse()
                    .with_context(|| format!("[inputs] entry '{name}'"))?;
                Ok((kind, file.clone()))
            })
            .collect()
    }

    /// File options with command-line flags applied on top.
    pub fn resolve_options(&self, flags: OptionFlags) -> RunOptions {
        let mut options = self.options.clone();
        if flags.no_states {
            options.split_by_state = false;
        }
        if flags.sectoral_plans {
            options.sectoral_plans = true;
        }
        if let Some(layout) = flags.layout {
            options.layout = layout;
        }
        if flags.power_unit_conversion {
            options.power_unit_conversion = true;
        }
        options
    }
}
