use chrono::{DateTime, Utc};
use models::{AlertType, Channel, MetricType, MonitoringPeriod};
use serde_json::Value;
use statistics::Statistic;

/// A table or view from which metrics are monitored.
#[derive(Clone, Debug, PartialEq)]
pub struct DataSource {
    pub name: String,
    pub from_expression: String,
    pub submission_date_column: String,
    pub build_id_column: String,
    pub client_id_column: String,
}

/// A metric to be monitored.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    pub name: String,
    pub data_source: DataSource,
    pub select_expression: String,
    pub friendly_name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub type_: MetricType,
}

/// A metric paired with one instantiated statistic.
#[derive(Debug)]
pub struct Summary {
    pub metric: Metric,
    pub statistic: Box<dyn Statistic>,
}

/// A dimension for segmenting client populations.
#[derive(Clone, Debug, PartialEq)]
pub struct Dimension {
    pub name: String,
    pub data_source: DataSource,
    pub select_expression: String,
    pub friendly_name: Option<String>,
    pub description: Option<String>,
}

/// An alert over the statistic results of its metrics.
#[derive(Debug)]
pub struct Alert {
    pub name: String,
    pub type_: AlertType,
    pub metrics: Vec<Summary>,
    pub friendly_name: Option<String>,
    pub description: Option<String>,
    pub parameters: Option<Vec<Value>>,
    pub min: Option<Vec<f64>>,
    pub max: Option<Vec<f64>>,
    pub window_size: Option<u32>,
    pub max_relative_change: Option<f64>,
    pub statistics: Option<Vec<String>>,
}

/// The resolved client-filtering criteria of a project.
#[derive(Debug)]
pub struct PopulationConfiguration {
    pub data_source: Option<DataSource>,
    pub boolean_pref: Option<String>,
    pub channel: Option<Channel>,
    pub branches: Vec<String>,
    pub monitor_entire_population: bool,
    pub group_by_dimension: Option<Dimension>,
}

/// Resolved top-level project settings.
#[derive(Debug)]
pub struct ProjectConfiguration {
    pub name: Option<String>,
    pub platform: Option<String>,
    pub xaxis: MonitoringPeriod,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub reference_branch: String,
    pub population: PopulationConfiguration,
    pub compact_visualization: bool,
    pub skip_default_metrics: bool,
    pub skip: bool,
}

/// The fully resolved, reference-free output of a monitoring spec,
/// consumed by the ETL layer.
#[derive(Debug)]
pub struct MonitoringConfiguration {
    pub project: ProjectConfiguration,
    pub metrics: Vec<Summary>,
    pub dimensions: Vec<Dimension>,
    pub alerts: Vec<Alert>,
}
