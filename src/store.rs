use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::record::Publication;

pub const DEFAULT_STORE_FILE: &str = "publications.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is not a valid publication list: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialise publications: {0}")]
    Serialise(#[source] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The publication list on disk: a pretty-printed JSON array, in listing order.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored list, or an empty one if the file does not exist yet.
    pub fn load(&self) -> Result<Vec<Publication>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with `publications`: two-space indentation, non-ASCII left as is.
    ///
    /// The write is not atomic; an interrupted run can leave a truncated file behind.
    pub fn save(&self, publications: &[Publication]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(publications).map_err(StoreError::Serialise)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
