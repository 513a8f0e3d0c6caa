//! Persistence of the library index.
//!
//! The whole index is written as one TOML document. Loading never fails the
//! caller: a missing file is an empty library, and an unreadable one is
//! logged and treated the same way.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ShelfError};
use crate::library::{IndexedDirectory, LibraryIndex};

const STATE_VERSION: u32 = 1;

#[derive(Deserialize)]
struct StateFile {
    version: u32,
    #[serde(default)]
    directories: BTreeMap<PathBuf, IndexedDirectory>,
}

#[derive(Serialize)]
struct StateFileRef<'a> {
    version: u32,
    directories: &'a BTreeMap<PathBuf, IndexedDirectory>,
}

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index, falling back to an empty one on any problem.
    pub fn load(&self) -> LibraryIndex {
        match self.try_load() {
            Ok(index) => {
                info!(
                    path = %self.path.display(),
                    directories = index.len(),
                    "library loaded"
                );
                index
            }
            Err(e) => {
                warn!(error = %e, "starting with an empty library");
                LibraryIndex::new()
            }
        }
    }

    /// Load the index; a missing file yields an empty index, anything else
    /// that goes wrong is reported.
    pub fn try_load(&self) -> Result<LibraryIndex> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LibraryIndex::new()),
            Err(e) => return Err(ShelfError::io(&self.path, e)),
        };

        let state: StateFile = toml::from_str(&text).map_err(|e| self.corrupt(e))?;
        if state.version != STATE_VERSION {
            return Err(self.corrupt(format!(
                "unsupported version {} (expected {STATE_VERSION})",
                state.version
            )));
        }
        Ok(LibraryIndex::from_directories(state.directories))
    }

    /// Write the index next to the target and rename it into place.
    pub fn save(&self, index: &LibraryIndex) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ShelfError::io(parent, e))?;
            }
        }

        let state = StateFileRef {
            version: STATE_VERSION,
            directories: index.directories(),
        };
        let text = toml::to_string_pretty(&state).map_err(|e| ShelfError::Serialize {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, text).map_err(|e| ShelfError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| ShelfError::io(&self.path, e))?;

        info!(
            path = %self.path.display(),
            directories = index.len(),
            "library saved"
        );
        Ok(())
    }

    fn corrupt(&self, reason: impl ToString) -> ShelfError {
        ShelfError::PersistenceCorrupt {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}
