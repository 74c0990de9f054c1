//! Resolution of layered monitoring specs into concrete configurations.
//!
//! A [`models::MonitoringSpec`] holds unresolved, name-based references.
//! [`resolve`] consumes a fully merged spec, looks every reference up in
//! the spec's own definition tables, and produces the immutable
//! [`MonitoringConfiguration`] consumed by the ETL layer. Consuming the
//! spec makes resolution single-use: merge layers first, resolve last.

use experiments::Experiment;
use models::MonitoringSpec;

mod alert;
mod configuration;
mod dimension;
mod errors;
mod metric;
mod project;
mod reference;

pub use configuration::{
    Alert, DataSource, Dimension, Metric, MonitoringConfiguration, PopulationConfiguration,
    ProjectConfiguration, Summary,
};
pub use errors::Error;

/// Resolve a merged monitoring spec against optional experiment metadata.
///
/// References are de-duplicated by name (first-seen order is preserved)
/// and every reference must have a definition in the spec; a missing
/// definition fails the whole project. Errors identify the missing or
/// invalid entity and are meant to be logged by the caller, which then
/// skips this project and continues with others.
pub fn resolve(
    spec: MonitoringSpec,
    experiment: Option<&Experiment>,
) -> Result<MonitoringConfiguration, Error> {
    let mut metrics = Vec::new();
    for name in reference::dedup_references(&spec.project.metrics) {
        let definition = spec
            .metrics
            .get(name)
            .ok_or_else(|| Error::no_definition_for("metric", name))?;
        metrics.extend(metric::walk_metric(&spec, name, definition)?);
    }

    let mut dimensions = Vec::new();
    for name in reference::dedup_references(&spec.project.population.dimensions) {
        dimensions.push(dimension::walk_dimension(&spec, name)?);
    }

    let mut alerts = Vec::new();
    for name in reference::dedup_references(&spec.project.alerts) {
        let definition = spec
            .alerts
            .get(name)
            .ok_or_else(|| Error::no_definition_for("alert", name))?;
        alerts.push(alert::walk_alert(&spec, name, definition)?);
    }

    // The project is resolved last: its population references dimensions
    // and data sources which are known valid by now.
    let project = project::walk_project(&spec, experiment)?;

    Ok(MonitoringConfiguration {
        project,
        metrics,
        dimensions,
        alerts,
    })
}
