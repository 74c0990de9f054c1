#[must_use]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{entity} name cannot be empty")]
    NameEmpty { entity: &'static str },
    #[error("{name} cannot be used as name for {entity} ({unmatched:?} is invalid)")]
    NameRegex {
        entity: &'static str,
        name: String,
        unmatched: String,
    },
    #[error("alert {alert} of type {type_} must not set {field}")]
    AlertFieldNotAllowed {
        alert: String,
        type_: &'static str,
        field: &'static str,
    },
    #[error("alert {alert} of type {type_} requires {field}")]
    AlertFieldRequired {
        alert: String,
        type_: &'static str,
        field: &'static str,
    },
    #[error("alert {alert} must define as many {field} entries as parameters")]
    AlertThresholdCount { alert: String, field: &'static str },
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}
