//! Statistics which can be referenced by name from metric and alert
//! configurations.
//!
//! A statistic is a named aggregation applied to a metric's per-client
//! values, parameterized by the tables configured under a metric's
//! `statistics` key. This crate carries the statistic names and their
//! validated parameters; rendering them into SQL happens downstream.

use serde::Deserialize;

mod registry;

pub use registry::{instantiate, is_registered, names};

/// Object is an alias for a JSON object.
pub type Object = serde_json::Map<String, serde_json::Value>;

#[must_use]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("statistic '{statistic}' does not exist")]
    UnknownStatistic { statistic: String },
    #[error("invalid parameters for statistic '{statistic}'")]
    Parameters {
        statistic: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A named statistic with its validated parameters.
pub trait Statistic: std::fmt::Debug + Send + Sync {
    /// The registered name of this statistic.
    fn name(&self) -> &'static str;
}

/// Number of clients reporting a value.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Count {}

impl Statistic for Count {
    fn name(&self) -> &'static str {
        "count"
    }
}

/// Sum of all reported values.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Sum {}

impl Statistic for Sum {
    fn name(&self) -> &'static str {
        "sum"
    }
}

/// Average of all reported values.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Mean {}

impl Statistic for Mean {
    fn name(&self) -> &'static str {
        "mean"
    }
}

/// A single quantile of the reported values.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Quantile {
    /// Granularity of the quantile computation.
    #[serde(default = "Quantile::default_number_of_quantiles")]
    pub number_of_quantiles: u64,
    /// Which quantile to report, as an offset into the computed quantiles.
    #[serde(default = "Quantile::default_quantile")]
    pub quantile: u64,
}

impl Quantile {
    fn default_number_of_quantiles() -> u64 {
        100
    }
    fn default_quantile() -> u64 {
        50
    }
}

impl Statistic for Quantile {
    fn name(&self) -> &'static str {
        "quantile"
    }
}

/// Percentiles of the reported values, with confidence intervals.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Percentile {
    /// Percentiles to report.
    #[serde(default = "Percentile::default_percentiles")]
    pub percentiles: Vec<u32>,
}

impl Percentile {
    fn default_percentiles() -> Vec<u32> {
        vec![50, 90, 99]
    }
}

impl Statistic for Percentile {
    fn name(&self) -> &'static str {
        "percentile"
    }
}

/// Ratio of the sum of the metric to the sum of a denominator metric.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TotalRatio {
    /// Metric whose sum is the denominator of the ratio.
    pub denominator_metric: String,
}

impl Statistic for TotalRatio {
    fn name(&self) -> &'static str {
        "total_ratio"
    }
}
