use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{DataSourceReference, DimensionReference};

/// A Dimension segments the monitored population, e.g. by operating
/// system or by country.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(example = "DimensionDefinition::example")]
pub struct DimensionDefinition {
    /// # SQL scalar expression which computes the segment value.
    pub select_expression: String,
    /// # Data source from which the dimension is computed.
    pub data_source: DataSourceReference,
    /// # Human-readable name shown in dashboards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    /// # Description shown in dashboards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DimensionDefinition {
    pub fn example() -> Self {
        Self {
            select_expression: "normalized_os".to_string(),
            data_source: DataSourceReference::example(),
            friendly_name: Some("OS".to_string()),
            description: None,
        }
    }
}

/// Dimension definitions of a monitoring spec, indexed by name.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(transparent)]
pub struct DimensionsSpec {
    pub definitions: BTreeMap<DimensionReference, DimensionDefinition>,
}

impl DimensionsSpec {
    pub fn get(&self, name: &DimensionReference) -> Option<&DimensionDefinition> {
        self.definitions.get(name)
    }

    /// Merge `other` onto this table. Definitions of `other` fully replace
    /// same-named definitions of `self`.
    pub fn merge(&mut self, other: Self) {
        self.definitions.extend(other.definitions);
    }
}
