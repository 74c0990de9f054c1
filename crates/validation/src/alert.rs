use models::{AlertDefinition, AlertReference, MonitoringSpec};

use crate::metric::walk_metric;
use crate::reference::dedup_references;
use crate::{Alert, Error};

/// Resolve an alert definition: its metric references are de-duplicated
/// and resolved to their summaries, and its statistic allow-list is
/// checked against the registered statistics.
pub fn walk_alert(
    spec: &MonitoringSpec,
    name: &AlertReference,
    definition: &AlertDefinition,
) -> Result<Alert, Error> {
    let mut metrics = Vec::new();
    for reference in dedup_references(&definition.metrics) {
        let metric = spec
            .metrics
            .get(reference)
            .ok_or_else(|| Error::NoSuchAlertMetric {
                alert: name.to_string(),
                name: reference.to_string(),
            })?;
        metrics.extend(walk_metric(spec, reference, metric)?);
    }

    if let Some(allowed) = &definition.statistics {
        for statistic in allowed {
            if !statistics::is_registered(statistic) {
                return Err(Error::NoSuchAlertStatistic {
                    alert: name.to_string(),
                    statistic: statistic.clone(),
                });
            }
        }
    }

    Ok(Alert {
        name: name.to_string(),
        type_: definition.type_,
        metrics,
        friendly_name: definition.friendly_name.clone(),
        description: definition.description.clone(),
        parameters: definition.parameters.clone(),
        min: definition.min.clone(),
        max: definition.max.clone(),
        window_size: definition.window_size,
        max_relative_change: definition.max_relative_change,
        statistics: definition.statistics.clone(),
    })
}
