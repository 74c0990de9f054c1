use std::path::PathBuf;

#[must_use]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML of {path:?}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid monitoring spec {path:?}")]
    Spec {
        path: PathBuf,
        #[source]
        source: models::Error,
    },
    #[error("no definition spec for platform {platform}")]
    UnknownPlatform { platform: String },
}
