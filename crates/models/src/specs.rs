use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    AlertsSpec, DataSourcesSpec, DimensionsSpec, Error, MetricsSpec, ProjectSpec,
};

/// A MonitoringSpec is one layer of a monitoring project's configuration:
/// its project settings plus tables of data-source, metric, dimension,
/// and alert definitions, all holding unresolved references.
///
/// Layers are combined with [`MonitoringSpec::merge`] in increasing
/// precedence order. Resolution consumes the spec, so a resolved spec
/// cannot be resolved (or further merged) again.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MonitoringSpec {
    /// # Project settings of this layer.
    #[serde(default)]
    pub project: ProjectSpec,
    /// # Data sources defined by this layer.
    #[serde(default, skip_serializing_if = "skip_data_sources")]
    pub data_sources: DataSourcesSpec,
    /// # Metrics defined by this layer.
    #[serde(default, skip_serializing_if = "skip_metrics")]
    pub metrics: MetricsSpec,
    /// # Dimensions defined by this layer.
    #[serde(default, skip_serializing_if = "skip_dimensions")]
    pub dimensions: DimensionsSpec,
    /// # Alerts defined by this layer.
    #[serde(default, skip_serializing_if = "skip_alerts")]
    pub alerts: AlertsSpec,
}

fn skip_data_sources(spec: &DataSourcesSpec) -> bool {
    spec.definitions.is_empty()
}
fn skip_metrics(spec: &MetricsSpec) -> bool {
    spec.definitions.is_empty()
}
fn skip_dimensions(spec: &DimensionsSpec) -> bool {
    spec.definitions.is_empty()
}
fn skip_alerts(spec: &AlertsSpec) -> bool {
    spec.definitions.is_empty()
}

impl MonitoringSpec {
    /// Parse a spec from a structured configuration document.
    ///
    /// Section keys and definition names are matched case-insensitively
    /// and are lower-cased before parsing. Definition names, references,
    /// and alert shapes are validated; any violation fails the parse.
    pub fn from_value(spec: Value) -> Result<Self, Error> {
        let spec: Self = serde_json::from_value(normalize(spec))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Build a root JSON schema for the monitoring spec model.
    pub fn root_json_schema() -> schemars::schema::RootSchema {
        let settings = schemars::gen::SchemaSettings::draft2019_09();
        let generator = schemars::gen::SchemaGenerator::new(settings);
        generator.into_root_schema_for::<Self>()
    }

    /// Merge `other` onto this spec, layer by layer: definitions and set
    /// fields of `other` take precedence over those of `self`.
    pub fn merge(&mut self, other: Self) {
        let Self {
            project,
            data_sources,
            metrics,
            dimensions,
            alerts,
        } = other;

        self.project.merge(project);
        self.data_sources.merge(data_sources);
        self.metrics.merge(metrics);
        self.dimensions.merge(dimensions);
        self.alerts.merge(alerts);
    }

    fn validate(&self) -> Result<(), Error> {
        for name in self.data_sources.definitions.keys() {
            name.validate()?;
        }
        for (name, definition) in &self.metrics.definitions {
            name.validate()?;
            definition.data_source.validate()?;
        }
        for (name, definition) in &self.dimensions.definitions {
            name.validate()?;
            definition.data_source.validate()?;
        }
        for (name, definition) in &self.alerts.definitions {
            name.validate()?;
            for metric in &definition.metrics {
                metric.validate()?;
            }
            definition.validate(name)?;
        }

        for metric in &self.project.metrics {
            metric.validate()?;
        }
        for alert in &self.project.alerts {
            alert.validate()?;
        }

        let population = &self.project.population;
        if let Some(data_source) = &population.data_source {
            data_source.validate()?;
        }
        for dimension in &population.dimensions {
            dimension.validate()?;
        }
        if let Some(dimension) = &population.group_by_dimension {
            dimension.validate()?;
        }
        Ok(())
    }
}

// Lower-case the section keys of a raw spec document, and the definition
// names within each section.
fn normalize(spec: Value) -> Value {
    let Value::Object(sections) = spec else {
        return spec;
    };

    let mut out = serde_json::Map::new();
    for (key, mut value) in sections {
        let key = key.to_lowercase();

        if matches!(
            key.as_str(),
            "data_sources" | "metrics" | "dimensions" | "alerts"
        ) {
            if let Value::Object(definitions) = value {
                value = Value::Object(
                    definitions
                        .into_iter()
                        .map(|(name, definition)| (name.to_lowercase(), definition))
                        .collect(),
                );
            }
        }
        out.insert(key, value);
    }
    Value::Object(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{DataSourceReference, MetricReference};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_trivial_spec() {
        let spec = MonitoringSpec::from_value(json!({})).unwrap();
        assert_eq!(spec, MonitoringSpec::default());
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let fixture = json!({
            "project": {"metrics": ["test"]},
            "metrics": {
                "test": {"select_expression": "SELECT 1", "data_source": "foo"},
            },
            "data_sources": {
                "foo": {"from_expression": "eggs"},
            },
        });

        let one = MonitoringSpec::from_value(fixture.clone()).unwrap();
        let two = MonitoringSpec::from_value(fixture).unwrap();
        assert_eq!(one, two);
    }

    #[test]
    fn test_section_keys_are_lower_cased() {
        let spec = MonitoringSpec::from_value(json!({
            "Metrics": {
                "Test": {"select_expression": "SELECT 1", "data_source": "foo"},
            },
            "DATA_SOURCES": {
                "Foo": {"from_expression": "eggs"},
            },
        }))
        .unwrap();

        assert!(spec.metrics.get(&MetricReference::new("test")).is_some());
        assert!(spec
            .data_sources
            .get(&DataSourceReference::new("foo"))
            .is_some());
    }

    #[test]
    fn test_merge_precedence() {
        let mut spec = MonitoringSpec::from_value(json!({
            "metrics": {
                "test": {"select_expression": "SELECT 1", "data_source": "foo"},
                "test2": {"select_expression": "SELECT 2", "data_source": "foo"},
            },
            "data_sources": {"foo": {"from_expression": "test"}},
            "dimensions": {"foo": {"select_expression": "bar", "data_source": "foo"}},
        }))
        .unwrap();

        let layered = MonitoringSpec::from_value(json!({
            "project": {"name": "foo", "metrics": ["test", "test2"]},
            "metrics": {
                "test": {"select_expression": "SELECT 'd'", "data_source": "foo"},
            },
            "data_sources": {"foo": {"from_expression": "bar"}},
        }))
        .unwrap();

        spec.merge(layered);

        assert_eq!(spec.project.name.as_deref(), Some("foo"));
        let test = spec.metrics.get(&MetricReference::new("test")).unwrap();
        assert_eq!(test.select_expression, "SELECT 'd'");
        let test2 = spec.metrics.get(&MetricReference::new("test2")).unwrap();
        assert_eq!(test2.select_expression, "SELECT 2");
        let foo = spec
            .data_sources
            .get(&DataSourceReference::new("foo"))
            .unwrap();
        assert_eq!(foo.from_expression, "bar");
    }

    #[test]
    fn test_invalid_alert_shape_fails_parse() {
        let err = MonitoringSpec::from_value(json!({
            "alerts": {
                "test": {"type": "threshold", "metrics": []},
            },
        }))
        .unwrap_err();
        assert!(err.to_string().contains("requires min or max"), "{err}");
    }

    #[test]
    fn test_invalid_definition_name_fails_parse() {
        let err = MonitoringSpec::from_value(json!({
            "data_sources": {
                "bad name": {"from_expression": "eggs"},
            },
        }))
        .unwrap_err();
        assert!(err.to_string().contains("cannot be used as name"), "{err}");
    }

    #[test]
    fn test_root_json_schema() {
        let schema = MonitoringSpec::root_json_schema();
        let schema = serde_json::to_value(&schema).unwrap();
        assert!(schema.get("definitions").is_some());
    }
}
