//! Experiment and rollout metadata, consumed as fallback defaults when
//! resolving monitoring specs.
//!
//! Fetching the Experimenter API is a collaborator concern; this crate
//! models the payload and the common [`Experiment`] record it converts to.

use chrono::{DateTime, Utc};
use models::Channel;
use serde::{Deserialize, Serialize};

mod api;

pub use api::ExperimentV6;

/// A branch of an experiment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    pub slug: String,
    #[serde(default = "Branch::default_ratio")]
    pub ratio: u32,
}

impl Branch {
    fn default_ratio() -> u32 {
        1
    }
}

/// Launch status of an experiment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Live,
    Complete,
}

/// Common representation of an Experimenter experiment or rollout.
#[derive(Clone, Debug, PartialEq)]
pub struct Experiment {
    pub experimenter_slug: Option<String>,
    pub normandy_slug: Option<String>,
    pub name: Option<String>,
    pub status: Option<Status>,
    pub branches: Vec<Branch>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub reference_branch: Option<String>,
    pub app_name: String,
    pub app_id: String,
    pub boolean_pref: Option<String>,
    pub channel: Option<Channel>,
    pub is_rollout: bool,
}

impl Experiment {
    /// The slug identifying this experiment, preferring the normandy slug.
    pub fn slug(&self) -> Option<&str> {
        self.normandy_slug
            .as_deref()
            .or(self.experimenter_slug.as_deref())
    }
}

/// All experiments known to Experimenter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExperimentCollection {
    pub experiments: Vec<Experiment>,
}

impl ExperimentCollection {
    pub fn new(experiments: Vec<Experiment>) -> Self {
        Self { experiments }
    }

    /// Parse a collection from an Experimenter v6 API payload.
    pub fn from_v6_payload(payload: &str) -> Result<Self, serde_json::Error> {
        let experiments: Vec<ExperimentV6> = serde_json::from_str(payload)?;
        Ok(Self::new(
            experiments
                .into_iter()
                .map(ExperimentV6::into_experiment)
                .collect(),
        ))
    }

    /// All experiments that have ever been live.
    pub fn ever_launched(&self) -> Self {
        Self::new(
            self.experiments
                .iter()
                .filter(|experiment| {
                    matches!(
                        experiment.status,
                        Some(Status::Live) | Some(Status::Complete) | None
                    )
                })
                .cloned()
                .collect(),
        )
    }

    /// The experiment with the given experimenter or normandy slug.
    pub fn with_slug(&self, slug: &str) -> Option<&Experiment> {
        self.experiments.iter().find(|experiment| {
            experiment.experimenter_slug.as_deref() == Some(slug)
                || experiment.normandy_slug.as_deref() == Some(slug)
        })
    }

    /// All rollouts.
    pub fn rollouts(&self) -> Self {
        Self::new(
            self.experiments
                .iter()
                .filter(|experiment| experiment.is_rollout)
                .cloned()
                .collect(),
        )
    }
}
