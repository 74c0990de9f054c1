mod alerts;
mod data_sources;
mod dimensions;
mod errors;
mod metrics;
mod population;
mod project;
mod references;
mod specs;

pub use alerts::{AlertDefinition, AlertType, AlertsSpec};
pub use data_sources::{DataSourceDefinition, DataSourcesSpec};
pub use dimensions::{DimensionDefinition, DimensionsSpec};
pub use errors::Error;
pub use metrics::{MetricDefinition, MetricType, MetricsSpec};
pub use population::{Channel, PopulationSpec};
pub use project::{MonitoringPeriod, ProjectSpec};
pub use references::{
    AlertReference, DataSourceReference, DimensionReference, MetricReference, Object,
};
pub use specs::MonitoringSpec;
