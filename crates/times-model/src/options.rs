//! Run options shared by the pipeline and the CLI config file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout of exported summary tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// Key columns followed by one column per year.
    #[default]
    Wide,
    /// Key columns followed by `year` and `value`.
    Long,
}

impl OutputLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputLayout::Wide => "wide",
            OutputLayout::Long => "long",
        }
    }
}

impl fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options controlling summary construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// Keep `state` as a key column.
    pub split_by_state: bool,

    /// Add the derived `sectoral_plan_sector` column to every summary.
    pub sectoral_plans: bool,

    pub layout: OutputLayout,

    /// Power exports in TWh: multiply by 3.6 and report in PJ.
    pub power_unit_conversion: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            split_by_state: true,
            sectoral_plans: false,
            layout: OutputLayout::Wide,
            power_unit_conversion: false,
        }
    }
}
