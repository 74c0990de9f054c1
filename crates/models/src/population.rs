use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DataSourceReference, DimensionReference};

/// Release channel of the monitored application.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Nightly,
    Beta,
    Release,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Nightly => "nightly",
            Channel::Beta => "beta",
            Channel::Release => "release",
        }
    }
}

impl std::str::FromStr for Channel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nightly" => Ok(Channel::Nightly),
            "beta" => Ok(Channel::Beta),
            "release" => Ok(Channel::Release),
            _ => Err(()),
        }
    }
}

/// A Population describes which clients are monitored: the branches or
/// boolean pref which splits them, the channel they report from, and the
/// dimensions used to segment results.
///
/// Fields left unset fall back to experiment metadata during resolution.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PopulationSpec {
    /// # Data source from which the population is sampled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSourceReference>,
    /// # Boolean pref whose value splits clients into branches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_pref: Option<String>,
    /// # Channel the monitored clients report from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    /// # Branch slugs to monitor, in presentation order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<String>>,
    /// # Dimensions used to segment the monitored population.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<DimensionReference>,
    /// # Monitor the entire population instead of specific branches.
    #[serde(default)]
    pub monitor_entire_population: bool,
    /// # Dimension to group statistic results by.
    /// Must also be listed in `dimensions`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by_dimension: Option<DimensionReference>,
}

impl PopulationSpec {
    /// Field-level merge: values of `other` win where set, except
    /// `branches`, which the lowest layer to set it wins.
    pub fn merge(&mut self, other: Self) {
        let Self {
            data_source,
            boolean_pref,
            channel,
            branches,
            dimensions,
            monitor_entire_population,
            group_by_dimension,
        } = other;

        self.data_source = data_source.or(self.data_source.take());
        self.boolean_pref = boolean_pref.or(self.boolean_pref.take());
        self.channel = channel.or(self.channel.take());
        // Branches of the base layer are kept. Overlays adjust the
        // population split through boolean_pref, not by renaming branches.
        self.branches = self.branches.take().or(branches);
        if !dimensions.is_empty() {
            self.dimensions = dimensions;
        }
        self.monitor_entire_population |= monitor_entire_population;
        self.group_by_dimension = group_by_dimension.or(self.group_by_dimension.take());
    }
}
