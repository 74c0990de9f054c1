use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use models::MonitoringSpec;

use crate::Error;

/// Subdirectory holding per-platform definition specs.
const DEFINITIONS_DIR: &str = "definitions";
/// Subdirectory holding default specs, keyed by platform or project type.
const DEFAULTS_DIR: &str = "defaults";

/// All monitoring specs found under one or more config roots, bucketed
/// by their role in spec composition.
///
/// A root holds project specs as top-level `*.toml` files keyed by file
/// stem (the project slug), platform definition specs under any
/// `definitions/` directory, and default specs under any `defaults/`
/// directory keyed by platform name or project type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigCollection {
    specs: BTreeMap<String, MonitoringSpec>,
    definitions: BTreeMap<String, MonitoringSpec>,
    defaults: BTreeMap<String, MonitoringSpec>,
}

impl ConfigCollection {
    /// Load every spec file under `root`.
    pub fn from_dir(root: &Path) -> Result<Self, Error> {
        let mut collection = Self::default();
        collection.load_dir(root, true)?;
        Ok(collection)
    }

    fn load_dir(&mut self, dir: &Path, top_level: bool) -> Result<(), Error> {
        let entries = fs::read_dir(dir).map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| Error::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();

            if path.is_dir() {
                match path.file_name().and_then(|name| name.to_str()) {
                    Some(DEFINITIONS_DIR) => self.load_bucket(&path, Bucket::Definitions)?,
                    Some(DEFAULTS_DIR) => self.load_bucket(&path, Bucket::Defaults)?,
                    _ => self.load_dir(&path, false)?,
                }
            } else if top_level && path.extension().and_then(|ext| ext.to_str()) == Some("toml") {
                let slug = file_stem(&path);
                let spec = load_spec(&path)?;
                tracing::debug!(?path, %slug, "loaded project spec");
                self.specs.insert(slug, spec);
            }
        }
        Ok(())
    }

    fn load_bucket(&mut self, dir: &Path, bucket: Bucket) -> Result<(), Error> {
        let entries = fs::read_dir(dir).map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| Error::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
                continue;
            }
            let key = file_stem(&path);
            let spec = load_spec(&path)?;
            tracing::debug!(?path, %key, kind = bucket.as_str(), "loaded spec");
            match bucket {
                Bucket::Definitions => self.definitions.insert(key, spec),
                Bucket::Defaults => self.defaults.insert(key, spec),
            };
        }
        Ok(())
    }

    /// Fold another collection into this one. Where both collections hold
    /// a spec under the same key, `other`'s wins whole.
    pub fn merge(&mut self, other: Self) {
        self.specs.extend(other.specs);
        self.definitions.extend(other.definitions);
        self.defaults.extend(other.defaults);
    }

    /// The project spec with the given slug.
    pub fn spec_for(&self, slug: &str) -> Option<&MonitoringSpec> {
        self.specs.get(slug)
    }

    /// The definition spec for the given platform.
    pub fn platform_definition(&self, platform: &str) -> Option<&MonitoringSpec> {
        self.definitions.get(platform)
    }

    /// The default spec for the given platform.
    pub fn default_for_platform(&self, platform: &str) -> Option<&MonitoringSpec> {
        self.defaults.get(platform)
    }

    /// The default spec for the given project type, such as `rollout`.
    pub fn default_for_type(&self, type_: &str) -> Option<&MonitoringSpec> {
        self.defaults.get(type_)
    }

    /// Slugs of all project specs in this collection.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Compose the layered spec of one project, ready for resolution.
    ///
    /// Later layers override earlier ones: the platform definition spec is
    /// the base, then the platform default spec, then the rollout default
    /// spec for rollouts, then the project's own spec.
    pub fn project_spec(
        &self,
        slug: &str,
        platform: &str,
        is_rollout: bool,
    ) -> Result<MonitoringSpec, Error> {
        let mut spec = self
            .platform_definition(platform)
            .ok_or_else(|| Error::UnknownPlatform {
                platform: platform.to_string(),
            })?
            .clone();

        if let Some(default) = self.default_for_platform(platform) {
            spec.merge(default.clone());
        }
        if is_rollout {
            if let Some(default) = self.default_for_type("rollout") {
                spec.merge(default.clone());
            }
        }
        match self.spec_for(slug) {
            Some(project) => spec.merge(project.clone()),
            None => tracing::debug!(%slug, "no project spec, composing from defaults only"),
        }
        Ok(spec)
    }
}

#[derive(Clone, Copy)]
enum Bucket {
    Definitions,
    Defaults,
}

impl Bucket {
    fn as_str(self) -> &'static str {
        match self {
            Bucket::Definitions => "definition",
            Bucket::Defaults => "default",
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}

fn load_spec(path: &Path) -> Result<MonitoringSpec, Error> {
    let raw = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value = toml::from_str(&raw).map_err(|source| Error::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    MonitoringSpec::from_value(value).map_err(|source| Error::Spec {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod test {
    use super::ConfigCollection;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collection_layout() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "my-project.toml", "[project]\nname = \"mine\"");
        write(
            dir.path(),
            "ops/definitions/firefox_desktop.toml",
            "[data_sources.main]\nfrom_expression = \"telemetry.main\"",
        );
        write(
            dir.path(),
            "ops/defaults/firefox_desktop.toml",
            "[project]\nmetrics = []",
        );
        write(dir.path(), "ops/nested.toml", "[project]\nname = \"hidden\"");
        write(dir.path(), "notes.txt", "not a spec");

        let collection = ConfigCollection::from_dir(dir.path()).unwrap();

        assert_eq!(collection.slugs().collect::<Vec<_>>(), vec!["my-project"]);
        assert!(collection.platform_definition("firefox_desktop").is_some());
        assert!(collection.default_for_platform("firefox_desktop").is_some());
        assert!(collection.spec_for("nested").is_none());
    }

    #[test]
    fn test_merge_later_collection_wins() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write(a.path(), "proj.toml", "[project]\nname = \"a\"");
        write(b.path(), "proj.toml", "[project]\nname = \"b\"");

        let mut collection = ConfigCollection::from_dir(a.path()).unwrap();
        collection.merge(ConfigCollection::from_dir(b.path()).unwrap());

        let spec = collection.spec_for("proj").unwrap();
        assert_eq!(spec.project.name.as_deref(), Some("b"));
    }

    #[test]
    fn test_compose_precedence() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "definitions/firefox_desktop.toml",
            r#"
            [metrics.crashes]
            select_expression = "SELECT 1"
            data_source = "main"
            statistics = { sum = {} }

            [data_sources.main]
            from_expression = "telemetry.main"
            "#,
        );
        write(
            dir.path(),
            "defaults/firefox_desktop.toml",
            "[project]\nmetrics = [\"crashes\"]\nreference_branch = \"default\"",
        );
        write(
            dir.path(),
            "defaults/rollout.toml",
            "[project]\ncompact_visualization = true",
        );
        write(
            dir.path(),
            "proj.toml",
            "[project]\nname = \"proj\"\nreference_branch = \"enabled\"",
        );

        let collection = ConfigCollection::from_dir(dir.path()).unwrap();

        let spec = collection.project_spec("proj", "firefox_desktop", true).unwrap();
        assert_eq!(spec.project.name.as_deref(), Some("proj"));
        assert_eq!(spec.project.reference_branch.as_deref(), Some("enabled"));
        assert!(spec.project.compact_visualization);
        assert!(spec.metrics.get(&models::MetricReference::new("crashes")).is_some());

        let spec = collection
            .project_spec("proj", "firefox_desktop", false)
            .unwrap();
        assert!(!spec.project.compact_visualization);
    }

    #[test]
    fn test_unknown_platform_fails_composition() {
        let collection = ConfigCollection::default();
        let err = collection.project_spec("proj", "fenix", false).unwrap_err();
        assert!(err.to_string().contains("fenix"), "{err}");
    }

    #[test]
    fn test_invalid_spec_fails_loading() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.toml", "[project]\nbogus_field = 1");
        assert!(ConfigCollection::from_dir(dir.path()).is_err());
    }
}
