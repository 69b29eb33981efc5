//! Errors raised while persisting `config.ron`.

use std::path::PathBuf;

/// A failure to read, parse or write the Pangaea settings file.
///
/// File-system and parse failures name the path involved so the CLI can
/// report which file to fix.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid RON for [`Config`](crate::Config).
    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("cannot encode settings as RON: {0}")]
    Serialize(#[source] ron::Error),
}
