//! The `Explorer` model: one library index, its metadata cache and the
//! duration resolver, owned together for the lifetime of a run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::{LibrarySettings, Settings};
use crate::error::{Result, ShelfError};
use crate::library::{self, AudioFile, DirectoryNode, LibraryIndex};
use crate::metadata::{FileMetadataCache, LengthResolver, RecordHandle, Resolution};

/// Files matched by a search, as cached records, plus how many were looked at.
pub struct SearchOutcome {
    pub records: Vec<RecordHandle>,
    pub scanned: usize,
}

pub struct Explorer {
    index: LibraryIndex,
    cache: FileMetadataCache,
    resolver: LengthResolver,
    library: LibrarySettings,
}

impl Explorer {
    pub fn new(index: LibraryIndex, settings: &Settings) -> Self {
        Self {
            index,
            cache: FileMetadataCache::new(),
            resolver: LengthResolver::new(&settings.resolver),
            library: settings.library.clone(),
        }
    }

    pub fn index(&self) -> &LibraryIndex {
        &self.index
    }

    /// Walk `dir` and add everything with audio under it as a new root.
    /// Returns how many directories were indexed (0 when none hold audio).
    pub fn add_directory(&mut self, dir: &Path) -> Result<usize> {
        let root = fs::canonicalize(dir).map_err(|e| ShelfError::io(dir, e))?;
        let tree: Option<DirectoryNode> = library::build(&root, &self.library)?;
        match tree {
            Some(tree) => {
                let added = self.index.add_subtree(tree, None);
                info!(root = %root.display(), directories = added, "directory added");
                Ok(added)
            }
            None => {
                info!(root = %root.display(), "no audio under directory, nothing added");
                Ok(0)
            }
        }
    }

    /// Remove `dir` and everything indexed below it.
    pub fn remove_directory(&mut self, dir: &Path) -> Result<Vec<PathBuf>> {
        let key = self.index_key(dir);
        self.index.remove_subtree(&key)
    }

    /// Records for the files directly inside `dir`, in path order, each
    /// tagged with its row index. Unresolved durations are requested in the
    /// background.
    pub fn list_directory(&mut self, dir: &Path) -> Result<Vec<RecordHandle>> {
        let key = self.index_key(dir);
        let node = self
            .index
            .get(&key)
            .ok_or(ShelfError::NotFound { path: key.clone() })?;

        let count = node.audio_files.len();
        if count > self.library.max_listing {
            return Err(ShelfError::TooManyFiles {
                path: key,
                count,
                limit: self.library.max_listing,
            });
        }

        let records = materialize(
            &mut self.cache,
            &mut self.resolver,
            node.audio_files.values(),
        );
        debug!(path = %key.display(), records = records.len(), "listed directory");
        Ok(records)
    }

    /// Search file names across the whole index.
    pub fn search(&mut self, term: &str) -> SearchOutcome {
        let hits = library::search(&self.index, term);
        let records = materialize(&mut self.cache, &mut self.resolver, hits.matches.iter());
        debug!(
            term,
            matches = records.len(),
            scanned = hits.scanned,
            cached = self.cache.len(),
            "search finished"
        );
        SearchOutcome {
            records,
            scanned: hits.scanned,
        }
    }

    /// Apply every duration that has arrived so far, without blocking.
    pub fn poll_resolutions(&mut self) -> Vec<Resolution> {
        let mut applied = Vec::new();
        while let Some(resolution) = self.resolver.try_next() {
            self.cache.apply(&resolution);
            applied.push(resolution);
        }
        applied
    }

    /// Apply durations as they arrive until none are pending or `timeout`
    /// passes.
    pub fn wait_for_resolutions(&mut self, timeout: Duration) -> Vec<Resolution> {
        let deadline = Instant::now() + timeout;
        let mut applied = self.poll_resolutions();
        while self.resolver.pending() > 0 {
            let Some(resolution) = self.resolver.next_before(deadline) else {
                break;
            };
            self.cache.apply(&resolution);
            applied.push(resolution);
        }
        applied
    }

    pub fn pending_resolutions(&self) -> usize {
        self.resolver.pending()
    }

    /// Forget every indexed directory.
    pub fn clear(&mut self) {
        self.index.clear();
    }

    /// Map a user-supplied path onto an index key: the path itself when it is
    /// indexed, otherwise its canonical (or at least absolute) form.
    fn index_key(&self, dir: &Path) -> PathBuf {
        if self.index.contains(dir) {
            return dir.to_path_buf();
        }
        fs::canonicalize(dir)
            .or_else(|_| std::path::absolute(dir))
            .unwrap_or_else(|_| dir.to_path_buf())
    }
}

/// Look up (or create) the cached records for `files` and number them in
/// display order.
fn materialize<'a>(
    cache: &mut FileMetadataCache,
    resolver: &mut LengthResolver,
    files: impl Iterator<Item = &'a AudioFile>,
) -> Vec<RecordHandle> {
    let mut rows = Vec::new();
    for file in files {
        for record in cache.lookup_or_create(file, resolver) {
            if let Ok(mut r) = record.lock() {
                r.index = Some(rows.len());
            }
            rows.push(record);
        }
    }
    rows
}
