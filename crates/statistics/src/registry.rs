use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

use super::{Count, Error, Mean, Object, Percentile, Quantile, Statistic, Sum, TotalRatio};

// An explicit registry of statistic constructors, keyed by registered
// name. Adding a statistic means adding a row here.
type Factory = fn(&Object) -> Result<Box<dyn Statistic>, serde_json::Error>;

lazy_static! {
    static ref REGISTRY: BTreeMap<&'static str, Factory> = {
        let mut registry: BTreeMap<&'static str, Factory> = BTreeMap::new();
        registry.insert("count", build::<Count>);
        registry.insert("sum", build::<Sum>);
        registry.insert("mean", build::<Mean>);
        registry.insert("quantile", build::<Quantile>);
        registry.insert("percentile", build::<Percentile>);
        registry.insert("total_ratio", build::<TotalRatio>);
        registry
    };
}

fn build<S>(params: &Object) -> Result<Box<dyn Statistic>, serde_json::Error>
where
    S: DeserializeOwned + Statistic + 'static,
{
    let statistic: S = serde_json::from_value(serde_json::Value::Object(params.clone()))?;
    Ok(Box::new(statistic))
}

/// Instantiate the named statistic from its configured parameters.
/// Unknown names and unknown or missing parameters fail.
pub fn instantiate(statistic: &str, params: &Object) -> Result<Box<dyn Statistic>, Error> {
    let factory = REGISTRY
        .get(statistic)
        .ok_or_else(|| Error::UnknownStatistic {
            statistic: statistic.to_string(),
        })?;

    factory(params).map_err(|source| Error::Parameters {
        statistic: statistic.to_string(),
        source,
    })
}

/// Whether `statistic` names a registered statistic.
pub fn is_registered(statistic: &str) -> bool {
    REGISTRY.contains_key(statistic)
}

/// The registered statistic names, in lexicographic order.
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().copied()
}
