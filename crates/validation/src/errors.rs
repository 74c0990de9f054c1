#[must_use]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No definition for {entity} {name}.")]
    NoSuchDefinition {
        entity: &'static str,
        name: String,
    },
    #[error("data source {name}, referenced by {ref_entity} {referenced_by}, has not been defined")]
    NoSuchDataSource {
        ref_entity: &'static str,
        referenced_by: String,
        name: String,
    },
    #[error("metric {name}, referenced by alert {alert}, has not been defined")]
    NoSuchAlertMetric { alert: String, name: String },
    #[error("statistic '{statistic}', allowed by alert {alert}, does not exist")]
    NoSuchAlertStatistic { alert: String, statistic: String },
    #[error("group_by_dimension {dimension} is not part of the population dimensions")]
    GroupByNotInDimensions { dimension: String },
    #[error(transparent)]
    Statistic(#[from] statistics::Error),
}

impl Error {
    pub fn no_definition_for(entity: &'static str, name: impl ToString) -> Self {
        Error::NoSuchDefinition {
            entity,
            name: name.to_string(),
        }
    }
}
