use models::{DataSourceReference, MonitoringSpec};

use crate::{DataSource, Error};

/// Resolve a data-source reference against the spec's data-source table.
/// `ref_entity` and `referenced_by` name the referencing definition for
/// error reporting.
pub fn walk_data_source(
    spec: &MonitoringSpec,
    name: &DataSourceReference,
    ref_entity: &'static str,
    referenced_by: &str,
) -> Result<DataSource, Error> {
    let definition = spec
        .data_sources
        .get(name)
        .ok_or_else(|| Error::NoSuchDataSource {
            ref_entity,
            referenced_by: referenced_by.to_string(),
            name: name.to_string(),
        })?;

    Ok(DataSource {
        name: name.to_string(),
        from_expression: definition.from_expression.clone(),
        submission_date_column: definition.submission_date_column.clone(),
        build_id_column: definition.build_id_column.clone(),
        client_id_column: definition.client_id_column.clone(),
    })
}

/// De-duplicate references by name, preserving first-seen order so that
/// downstream rendering sees declarations in their configured order.
pub fn dedup_references<T: Ord>(references: &[T]) -> Vec<&T> {
    let mut seen = std::collections::BTreeSet::new();
    references
        .iter()
        .filter(|reference| seen.insert(*reference))
        .collect()
}
