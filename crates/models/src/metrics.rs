use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{from_value, json};
use std::collections::BTreeMap;

use super::{DataSourceReference, MetricReference, Object};

/// The shape of a metric's per-client values, which determines how
/// statistics aggregate it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Scalar,
    Histogram,
}

impl Default for MetricType {
    fn default() -> Self {
        MetricType::Scalar
    }
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Scalar => "scalar",
            MetricType::Histogram => "histogram",
        }
    }
}

/// A Metric defines a scalar or histogram aggregate computed over a data
/// source, together with the statistics which summarize it per branch.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(example = "MetricDefinition::example")]
pub struct MetricDefinition {
    /// # SQL scalar expression which computes the per-client value.
    pub select_expression: String,
    /// # Data source from which the metric is computed.
    pub data_source: DataSourceReference,
    /// # Human-readable name shown in dashboards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    /// # Description shown in dashboards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// # Category used to group metrics in dashboards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// # Value shape of this metric.
    #[serde(default, rename = "type")]
    pub type_: MetricType,
    /// # Statistics to compute, as statistic name to parameter table.
    /// Declaration order is preserved and determines the order of the
    /// resolved summaries.
    #[serde(default = "MetricDefinition::default_statistics")]
    #[schemars(schema_with = "statistics_schema")]
    pub statistics: IndexMap<String, Object>,
}

impl MetricDefinition {
    pub fn default_statistics() -> IndexMap<String, Object> {
        let mut statistics = IndexMap::new();
        statistics.insert("percentile".to_string(), Object::new());
        statistics
    }

    pub fn example() -> Self {
        Self {
            select_expression: "SUM(active_hours_sum)".to_string(),
            data_source: DataSourceReference::example(),
            friendly_name: Some("Active hours".to_string()),
            description: None,
            category: None,
            type_: MetricType::Scalar,
            statistics: Self::default_statistics(),
        }
    }
}

fn statistics_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
    from_value(json!({
        "type": "object",
        "additionalProperties": {"type": "object"},
        "examples": [{"percentile": {}, "sum": {}}],
    }))
    .unwrap()
}

/// Metric definitions of a monitoring spec, indexed by name.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(transparent)]
pub struct MetricsSpec {
    pub definitions: BTreeMap<MetricReference, MetricDefinition>,
}

impl MetricsSpec {
    pub fn get(&self, name: &MetricReference) -> Option<&MetricDefinition> {
        self.definitions.get(name)
    }

    /// Merge `other` onto this table. Definitions of `other` fully replace
    /// same-named definitions of `self`.
    pub fn merge(&mut self, other: Self) {
        self.definitions.extend(other.definitions);
    }
}
