use models::{DimensionReference, MonitoringSpec};

use crate::reference::walk_data_source;
use crate::{Dimension, Error};

/// Resolve a dimension reference against the spec's dimension table.
pub fn walk_dimension(
    spec: &MonitoringSpec,
    name: &DimensionReference,
) -> Result<Dimension, Error> {
    let definition = spec
        .dimensions
        .get(name)
        .ok_or_else(|| Error::no_definition_for("dimension", name))?;

    let data_source = walk_data_source(spec, &definition.data_source, "dimension", name)?;

    Ok(Dimension {
        name: name.to_string(),
        data_source,
        select_expression: definition.select_expression.clone(),
        friendly_name: definition.friendly_name.clone(),
        description: definition.description.clone(),
    })
}
