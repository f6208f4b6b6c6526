//! Error taxonomy for font decoding.

use std::path::PathBuf;

use read_fonts::types::Tag;
use read_fonts::ReadError;
use thiserror::Error;

/// Failures that cause a file (or a single collection member) to be skipped.
#[derive(Debug, Error)]
pub enum FontDbError {
    #[error("reading font {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("truncated {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: ReadError,
    },

    #[error("unsupported '{table}' version {major}.{minor}")]
    UnsupportedVersion { table: Tag, major: u16, minor: u16 },
}

impl FontDbError {
    pub(crate) fn parse(what: &'static str) -> impl FnOnce(ReadError) -> Self {
        move |source| FontDbError::Parse { what, source }
    }
}

pub type Result<T, E = FontDbError> = std::result::Result<T, E>;
