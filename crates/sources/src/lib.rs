//! Loading of monitoring spec files from local config directories.
//!
//! A config root holds project specs as top-level TOML files, platform
//! definition specs under `definitions/`, and default specs under
//! `defaults/`. [`ConfigCollection`] buckets the parsed specs and
//! composes the layered spec of a single project; [`ConfigLoader`]
//! caches collections across one or more roots with explicit refresh.

mod collection;
mod errors;
mod loader;

pub use collection::ConfigCollection;
pub use errors::Error;
pub use loader::ConfigLoader;
