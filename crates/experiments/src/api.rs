use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use super::{Branch, Experiment, Status};

/// An experiment as served by the Experimenter v6 API.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentV6 {
    pub slug: String,
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub reference_branch: Option<String>,
    #[serde(default)]
    pub user_facing_name: Option<String>,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub is_rollout: Option<bool>,
}

impl ExperimentV6 {
    /// Convert to the common [`Experiment`] representation.
    ///
    /// Rollouts which predate the explicit `isRollout` flag are inferred
    /// from having a single branch. Experiments without an end date, or
    /// whose end date has not passed, are considered live.
    pub fn into_experiment(self) -> Experiment {
        let to_utc = |date: NaiveDate| date.and_time(NaiveTime::MIN).and_utc();

        let status = match self.end_date {
            None => Some(Status::Live),
            Some(end) if to_utc(end) >= Utc::now() => Some(Status::Live),
            Some(_) => Some(Status::Complete),
        };
        let is_rollout = self.is_rollout.unwrap_or(self.branches.len() == 1);

        Experiment {
            experimenter_slug: None,
            normandy_slug: Some(self.slug),
            name: self.user_facing_name,
            status,
            branches: self.branches,
            start_date: self.start_date.map(to_utc),
            end_date: self.end_date.map(to_utc),
            reference_branch: self.reference_branch,
            app_name: self.app_name.unwrap_or_else(|| "firefox_desktop".to_string()),
            app_id: self.app_id.unwrap_or_else(|| "firefox-desktop".to_string()),
            boolean_pref: None,
            channel: self.channel.and_then(|channel| channel.parse().ok()),
            is_rollout,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use models::Channel;

    #[test]
    fn test_v6_payload() {
        let payload = r#"[
            {
                "slug": "tcp-rollout",
                "branches": [{"slug": "active", "ratio": 1}],
                "startDate": "2022-01-01",
                "endDate": null,
                "referenceBranch": null,
                "userFacingName": "Total Cookie Protection",
                "appName": "firefox_desktop",
                "appId": "firefox-desktop",
                "channel": "release",
                "isRollout": true
            },
            {
                "slug": "two-branch-test",
                "branches": [
                    {"slug": "control", "ratio": 1},
                    {"slug": "treatment", "ratio": 1}
                ],
                "startDate": "2021-06-01",
                "endDate": "2021-07-01",
                "referenceBranch": "control",
                "userFacingName": "A Test",
                "channel": "mesa"
            }
        ]"#;

        let collection = crate::ExperimentCollection::from_v6_payload(payload).unwrap();
        assert_eq!(collection.experiments.len(), 2);

        let rollout = collection.with_slug("tcp-rollout").unwrap();
        assert!(rollout.is_rollout);
        assert_eq!(rollout.status, Some(Status::Live));
        assert_eq!(rollout.channel, Some(Channel::Release));

        let test = collection.with_slug("two-branch-test").unwrap();
        assert!(!test.is_rollout);
        assert_eq!(test.status, Some(Status::Complete));
        assert_eq!(test.reference_branch.as_deref(), Some("control"));
        // Unknown channels are dropped rather than failing the parse.
        assert_eq!(test.channel, None);
        assert_eq!(
            test.branches.iter().map(|b| b.slug.as_str()).collect::<Vec<_>>(),
            vec!["control", "treatment"]
        );
    }

    #[test]
    fn test_single_branch_implies_rollout() {
        let payload = r#"[{"slug": "implicit", "branches": [{"slug": "only"}]}]"#;
        let collection = crate::ExperimentCollection::from_v6_payload(payload).unwrap();
        assert!(collection.experiments[0].is_rollout);
        assert_eq!(collection.experiments[0].app_name, "firefox_desktop");
    }
}
