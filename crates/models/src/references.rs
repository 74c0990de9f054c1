use lazy_static::lazy_static;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{from_value, json, Value};

use crate::Error;

// This module contains types which are references to definitions within a
// monitoring spec. They use the newtype pattern for strong type safety.

// TOKEN is a string production for definition names: Unicode letters and
// digits plus a restricted set of punctuation, matching the identifiers
// used as TOML table keys in monitoring configs (e.g. `active_hours`,
// `main-crashes`, `gmp.update`).
const TOKEN: &'static str = r"[\p{Letter}\p{Digit}\-_\.]+";

lazy_static! {
    // NAME_RE is a single TOKEN component.
    static ref NAME_RE: Regex = Regex::new(TOKEN).unwrap();
}

macro_rules! string_reference_types {
    (
        $(#[$outer:meta])*
        $vis:vis struct $Wrapper:ident($WrapperStr:literal, entity = $Entity:literal, example = $Example:literal);

        $($rest:tt)*
    ) => {

        $(#[$outer])*
        #[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, JsonSchema, Eq, PartialOrd, Ord, Hash)]
        #[schemars(example = "Self::example")]
        pub struct $Wrapper(#[schemars(schema_with = $WrapperStr)] String);

        impl $Wrapper {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
            pub fn example() -> Self {
                Self($Example.into())
            }

            /// Validate the referenced name against the TOKEN production,
            /// producing an error which names the unmatched portion.
            pub fn validate(&self) -> Result<(), Error> {
                let s = self.0.as_str();

                if s.is_empty() {
                    return Err(Error::NameEmpty { entity: $Entity });
                }

                let (start, stop) = NAME_RE
                    .find(s)
                    .map(|m| (m.start(), m.end()))
                    .unwrap_or((0, 0));
                let unmatched = [&s[..start], &s[stop..]].concat();

                if !unmatched.is_empty() {
                    return Err(Error::NameRegex {
                        entity: $Entity,
                        name: s.to_string(),
                        unmatched,
                    });
                }
                Ok(())
            }

            fn schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
                from_value(json!({
                    "type": "string",
                    "pattern": &["^", NAME_RE.as_str(), "$"].concat(),
                }))
                .unwrap()
            }
        }

        impl std::ops::Deref for $Wrapper {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $Wrapper {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $Wrapper {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        string_reference_types! {
            $($rest)*
        }
    };

    () => {};
}

string_reference_types! {
    /// A name which references a data source defined in the spec's
    /// data-source table.
    pub struct DataSourceReference("DataSourceReference::schema", entity = "data source", example = "main");

    /// A name which references a metric defined in the spec's metric table.
    pub struct MetricReference("MetricReference::schema", entity = "metric", example = "active_hours");

    /// A name which references a dimension defined in the spec's
    /// dimension table.
    pub struct DimensionReference("DimensionReference::schema", entity = "dimension", example = "os");

    /// A name which references an alert defined in the spec's alert table.
    pub struct AlertReference("AlertReference::schema", entity = "alert", example = "ci_diffs");
}

/// Object is an alias for a JSON object.
pub type Object = serde_json::Map<String, Value>;
