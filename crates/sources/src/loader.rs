use std::path::PathBuf;

use crate::{ConfigCollection, Error};

/// Loads and caches the spec collections of one or more config roots.
///
/// The loader is constructed with its roots and holds an empty collection
/// until the first [`refresh`](Self::refresh). Callers decide when the
/// cache is rebuilt; nothing reloads behind their back.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    roots: Vec<PathBuf>,
    cached: ConfigCollection,
}

impl ConfigLoader {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            cached: ConfigCollection::default(),
        }
    }

    /// The cached collection, as of the last refresh.
    pub fn configs(&self) -> &ConfigCollection {
        &self.cached
    }

    /// Re-read all roots, in order, replacing the cache. Later roots win
    /// over earlier ones where they define the same spec.
    pub fn refresh(&mut self) -> Result<&ConfigCollection, Error> {
        let mut collection = ConfigCollection::default();
        for root in &self.roots {
            tracing::debug!(?root, "loading config root");
            collection.merge(ConfigCollection::from_dir(root)?);
        }
        self.cached = collection;
        Ok(&self.cached)
    }
}
