use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use experiments::Experiment;
use models::MonitoringSpec;

use crate::dimension::walk_dimension;
use crate::reference::walk_data_source;
use crate::{Error, PopulationConfiguration, ProjectConfiguration};

const DEFAULT_REFERENCE_BRANCH: &str = "control";

/// Resolve the project's population. Fields left unset by the spec fall
/// back to experiment metadata, with pref and branch fallbacks suppressed
/// for rollouts (a rollout has no meaningful branch split).
pub fn walk_population(
    spec: &MonitoringSpec,
    experiment: Option<&Experiment>,
) -> Result<PopulationConfiguration, Error> {
    let population = &spec.project.population;

    if let Some(group_by) = &population.group_by_dimension {
        if !population.dimensions.contains(group_by) {
            return Err(Error::GroupByNotInDimensions {
                dimension: group_by.to_string(),
            });
        }
    }

    let referenced_by = spec.project.name.as_deref().unwrap_or("project");
    let data_source = match &population.data_source {
        Some(name) => Some(walk_data_source(spec, name, "population", referenced_by)?),
        None => None,
    };

    let group_by_dimension = match &population.group_by_dimension {
        Some(name) => Some(walk_dimension(spec, name)?),
        None => None,
    };

    let split_experiment = experiment.filter(|experiment| !experiment.is_rollout);

    let boolean_pref = population
        .boolean_pref
        .clone()
        .or_else(|| split_experiment.and_then(|experiment| experiment.boolean_pref.clone()));

    let channel = population
        .channel
        .or_else(|| experiment.and_then(|experiment| experiment.channel));

    let branches = match &population.branches {
        Some(branches) => branches.clone(),
        // Branches default from the experiment only when the population
        // isn't already split by a boolean pref.
        None if population.boolean_pref.is_none() => split_experiment
            .map(|experiment| {
                experiment
                    .branches
                    .iter()
                    .map(|branch| branch.slug.clone())
                    .collect()
            })
            .unwrap_or_default(),
        None => Vec::new(),
    };

    Ok(PopulationConfiguration {
        data_source,
        boolean_pref,
        channel,
        branches,
        monitor_entire_population: population.monitor_entire_population,
        group_by_dimension,
    })
}

/// Resolve the project settings, falling back to experiment metadata for
/// name, dates, platform, and the reference branch.
pub fn walk_project(
    spec: &MonitoringSpec,
    experiment: Option<&Experiment>,
) -> Result<ProjectConfiguration, Error> {
    let project = &spec.project;

    let name = project
        .name
        .clone()
        .or_else(|| experiment.and_then(|experiment| experiment.name.clone()));
    let platform = project
        .platform
        .clone()
        .or_else(|| experiment.map(|experiment| experiment.app_name.clone()));

    let start_date = project
        .start_date
        .map(to_utc)
        .or_else(|| experiment.and_then(|experiment| experiment.start_date));
    let end_date = project
        .end_date
        .map(to_utc)
        .or_else(|| experiment.and_then(|experiment| experiment.end_date));

    let reference_branch = project
        .reference_branch
        .clone()
        .or_else(|| experiment.and_then(|experiment| experiment.reference_branch.clone()))
        .unwrap_or_else(|| DEFAULT_REFERENCE_BRANCH.to_string());

    Ok(ProjectConfiguration {
        name,
        platform,
        xaxis: project.xaxis.unwrap_or_default(),
        start_date,
        end_date,
        reference_branch,
        population: walk_population(spec, experiment)?,
        compact_visualization: project.compact_visualization,
        skip_default_metrics: project.skip_default_metrics,
        skip: project.skip,
    })
}

fn to_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
