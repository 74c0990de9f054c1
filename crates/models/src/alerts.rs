use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::{AlertReference, Error, MetricReference};

/// The condition an alert evaluates over its metrics' statistic results.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Alert when confidence intervals of different branches stop
    /// overlapping.
    CiOverlap,
    /// Alert when results exceed or fall below fixed thresholds.
    Threshold,
    /// Alert when the average of the most recent measurement window
    /// diverges from the average of the previous window.
    AvgDiff,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::CiOverlap => "ci_overlap",
            AlertType::Threshold => "threshold",
            AlertType::AvgDiff => "avg_diff",
        }
    }
}

/// An Alert evaluates a condition over the statistic results of one or
/// more metrics. Which fields are required or forbidden depends on the
/// alert type, and is checked when the owning spec is parsed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(example = "AlertDefinition::example")]
pub struct AlertDefinition {
    /// # Condition this alert evaluates.
    #[serde(rename = "type")]
    pub type_: AlertType,
    /// # Metrics the alert is evaluated for.
    #[serde(default)]
    pub metrics: Vec<MetricReference>,
    /// # Human-readable name shown in dashboards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    /// # Description shown in dashboards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// # Statistic parameters the thresholds of this alert apply to.
    /// `percentiles` is accepted as a legacy spelling.
    #[serde(default, alias = "percentiles", skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Value>>,
    /// # Lower thresholds, one per parameter. Only valid for `threshold`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Vec<f64>>,
    /// # Upper thresholds, one per parameter. Only valid for `threshold`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Vec<f64>>,
    /// # Number of days making up each compared window. Only valid for
    /// `avg_diff`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_size: Option<u32>,
    /// # Relative change of window averages at which to alert. Only valid
    /// for `avg_diff`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_relative_change: Option<f64>,
    /// # Statistic names the alert is restricted to. When unset, the alert
    /// applies to all statistics of its metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Vec<String>>,
}

impl AlertDefinition {
    pub fn example() -> Self {
        Self {
            type_: AlertType::Threshold,
            metrics: vec![MetricReference::example()],
            friendly_name: None,
            description: None,
            parameters: None,
            min: Some(vec![0.0]),
            max: None,
            window_size: None,
            max_relative_change: None,
            statistics: None,
        }
    }

    /// Check the type-dependent field shape of this alert. Fields which are
    /// irrelevant to the declared type must be unset, and required fields
    /// must be set.
    pub fn validate(&self, name: &AlertReference) -> Result<(), Error> {
        let type_ = self.type_.as_str();
        let alert = || name.to_string();

        let forbid = |field: &'static str, set: bool| -> Result<(), Error> {
            if set {
                Err(Error::AlertFieldNotAllowed {
                    alert: alert(),
                    type_,
                    field,
                })
            } else {
                Ok(())
            }
        };

        match self.type_ {
            AlertType::CiOverlap => {
                forbid("min", self.min.is_some())?;
                forbid("max", self.max.is_some())?;
                forbid("window_size", self.window_size.is_some())?;
                forbid("max_relative_change", self.max_relative_change.is_some())?;
            }
            AlertType::Threshold => {
                forbid("window_size", self.window_size.is_some())?;
                forbid("max_relative_change", self.max_relative_change.is_some())?;

                if self.min.is_none() && self.max.is_none() {
                    return Err(Error::AlertFieldRequired {
                        alert: alert(),
                        type_,
                        field: "min or max",
                    });
                }
                if let Some(parameters) = &self.parameters {
                    for (field, thresholds) in [("min", &self.min), ("max", &self.max)] {
                        if let Some(thresholds) = thresholds {
                            if thresholds.len() != parameters.len() {
                                return Err(Error::AlertThresholdCount {
                                    alert: alert(),
                                    field,
                                });
                            }
                        }
                    }
                }
            }
            AlertType::AvgDiff => {
                forbid("min", self.min.is_some())?;
                forbid("max", self.max.is_some())?;

                if self.window_size.is_none() {
                    return Err(Error::AlertFieldRequired {
                        alert: alert(),
                        type_,
                        field: "window_size",
                    });
                }
                if self.max_relative_change.is_none() {
                    return Err(Error::AlertFieldRequired {
                        alert: alert(),
                        type_,
                        field: "max_relative_change",
                    });
                }
            }
        }
        Ok(())
    }

    /// Field-level merge of a same-named alert from a higher-precedence
    /// layer: metric references accumulate, scalar fields of `other` win
    /// when set.
    fn merge(&mut self, other: Self) {
        let Self {
            type_,
            metrics,
            friendly_name,
            description,
            parameters,
            min,
            max,
            window_size,
            max_relative_change,
            statistics,
        } = other;

        self.type_ = type_;
        self.metrics.extend(metrics);
        self.friendly_name = friendly_name.or(self.friendly_name.take());
        self.description = description.or(self.description.take());
        self.parameters = parameters.or(self.parameters.take());
        self.min = min.or(self.min.take());
        self.max = max.or(self.max.take());
        self.window_size = window_size.or(self.window_size.take());
        self.max_relative_change = max_relative_change.or(self.max_relative_change.take());
        self.statistics = statistics.or(self.statistics.take());
    }
}

/// Alert definitions of a monitoring spec, indexed by name.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(transparent)]
pub struct AlertsSpec {
    pub definitions: BTreeMap<AlertReference, AlertDefinition>,
}

impl AlertsSpec {
    pub fn get(&self, name: &AlertReference) -> Option<&AlertDefinition> {
        self.definitions.get(name)
    }

    /// Merge `other` onto this table. Unlike the other definition tables,
    /// same-named alerts are merged field by field: their metric lists
    /// accumulate across layers rather than being replaced.
    pub fn merge(&mut self, other: Self) {
        for (name, definition) in other.definitions {
            match self.definitions.entry(name) {
                Entry::Occupied(mut entry) => entry.get_mut().merge(definition),
                Entry::Vacant(entry) => {
                    entry.insert(definition);
                }
            }
        }
    }
}
