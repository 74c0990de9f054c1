use models::{MetricDefinition, MetricReference, MonitoringSpec};

use crate::reference::walk_data_source;
use crate::{Error, Metric, Summary};

/// Resolve a metric definition into one summary per configured statistic,
/// in declaration order.
pub fn walk_metric(
    spec: &MonitoringSpec,
    name: &MetricReference,
    definition: &MetricDefinition,
) -> Result<Vec<Summary>, Error> {
    let data_source = walk_data_source(spec, &definition.data_source, "metric", name)?;

    let mut summaries = Vec::with_capacity(definition.statistics.len());
    for (statistic, params) in &definition.statistics {
        let statistic = statistics::instantiate(statistic, params)?;

        // Each summary carries its own copy of the metric. A metric with
        // several statistics appears once per statistic.
        summaries.push(Summary {
            metric: Metric {
                name: name.to_string(),
                data_source: data_source.clone(),
                select_expression: definition.select_expression.clone(),
                friendly_name: definition.friendly_name.clone(),
                description: definition.description.clone(),
                category: definition.category.clone(),
                type_: definition.type_,
            },
            statistic,
        });
    }
    Ok(summaries)
}
