use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{AlertReference, MetricReference, PopulationSpec};

/// The period results are bucketed by, used as the x-axis of dashboards.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum MonitoringPeriod {
    #[serde(rename = "build_id")]
    BuildId,
    #[serde(rename = "submission_date")]
    Day,
}

impl Default for MonitoringPeriod {
    fn default() -> Self {
        MonitoringPeriod::Day
    }
}

impl MonitoringPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitoringPeriod::BuildId => "build_id",
            MonitoringPeriod::Day => "submission_date",
        }
    }
}

/// Top-level settings of a monitoring project.
///
/// Fields left unset fall back to experiment metadata during resolution.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ProjectSpec {
    /// # Human-readable project name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// # Platform (application) the project monitors, e.g. firefox_desktop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// # Period results are bucketed by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<MonitoringPeriod>,
    /// # First date of monitoring, as YYYY-MM-DD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// # Last date of monitoring, as YYYY-MM-DD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// # Metrics monitored by this project.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<MetricReference>,
    /// # Alerts evaluated for this project.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<AlertReference>,
    /// # Branch results are compared against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_branch: Option<String>,
    /// # Population monitored by this project.
    #[serde(default)]
    pub population: PopulationSpec,
    /// # Render all metrics into a single condensed dashboard group.
    #[serde(default)]
    pub compact_visualization: bool,
    /// # Skip the platform's default metrics for this project.
    #[serde(default)]
    pub skip_default_metrics: bool,
    /// # Kill switch: parse and resolve the project, but do not run it.
    #[serde(default)]
    pub skip: bool,
}

impl ProjectSpec {
    /// Field-level merge: values of `other` win where set, reference lists
    /// of `other` replace `self`'s when non-empty, and boolean switches
    /// combine with logical or.
    pub fn merge(&mut self, other: Self) {
        let Self {
            name,
            platform,
            xaxis,
            start_date,
            end_date,
            metrics,
            alerts,
            reference_branch,
            population,
            compact_visualization,
            skip_default_metrics,
            skip,
        } = other;

        self.name = name.or(self.name.take());
        self.platform = platform.or(self.platform.take());
        self.xaxis = xaxis.or(self.xaxis.take());
        self.start_date = start_date.or(self.start_date.take());
        self.end_date = end_date.or(self.end_date.take());
        if !metrics.is_empty() {
            self.metrics = metrics;
        }
        if !alerts.is_empty() {
            self.alerts = alerts;
        }
        self.reference_branch = reference_branch.or(self.reference_branch.take());
        self.population.merge(population);
        self.compact_visualization |= compact_visualization;
        self.skip_default_metrics |= skip_default_metrics;
        self.skip |= skip;
    }
}
