use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::DataSourceReference;

/// A DataSource describes a table or view from which metrics and
/// dimensions may be computed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(example = "DataSourceDefinition::example")]
pub struct DataSourceDefinition {
    /// # Expression naming the monitored table or view.
    /// May be any SQL table expression, and may embed a `{dataset}`
    /// placeholder which downstream rendering fills with the target
    /// dataset name.
    pub from_expression: String,
    /// # Column which records the date a row was received.
    #[serde(default = "DataSourceDefinition::default_submission_date_column")]
    pub submission_date_column: String,
    /// # Column which records the application build a row came from.
    #[serde(default = "DataSourceDefinition::default_build_id_column")]
    pub build_id_column: String,
    /// # Column which identifies the reporting client.
    #[serde(default = "DataSourceDefinition::default_client_id_column")]
    pub client_id_column: String,
}

impl DataSourceDefinition {
    pub fn default_submission_date_column() -> String {
        "submission_date".to_string()
    }
    pub fn default_build_id_column() -> String {
        "build_id".to_string()
    }
    pub fn default_client_id_column() -> String {
        "client_id".to_string()
    }

    pub fn example() -> Self {
        Self {
            from_expression: "mozdata.telemetry.main".to_string(),
            submission_date_column: Self::default_submission_date_column(),
            build_id_column: Self::default_build_id_column(),
            client_id_column: Self::default_client_id_column(),
        }
    }
}

/// Data-source definitions of a monitoring spec, indexed by name.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(transparent)]
pub struct DataSourcesSpec {
    pub definitions: BTreeMap<DataSourceReference, DataSourceDefinition>,
}

impl DataSourcesSpec {
    pub fn get(&self, name: &DataSourceReference) -> Option<&DataSourceDefinition> {
        self.definitions.get(name)
    }

    /// Merge `other` onto this table. Definitions of `other` fully replace
    /// same-named definitions of `self`.
    pub fn merge(&mut self, other: Self) {
        self.definitions.extend(other.definitions);
    }
}
