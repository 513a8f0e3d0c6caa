use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::library::AudioFile;

use super::resolver::LengthResolver;
use super::types::{FileRecord, RecordHandle, ResolveJob, Resolution};

/// Records handed out so far, keyed by file path. Lives for one run; entries
/// are never evicted and never persisted.
#[derive(Debug, Default)]
pub struct FileMetadataCache {
    entries: HashMap<PathBuf, Vec<RecordHandle>>,
}

impl FileMetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the records cached for `file`, creating a pending one (and
    /// asking `resolver` for its duration) on first sight. Never blocks.
    pub fn lookup_or_create(
        &mut self,
        file: &AudioFile,
        resolver: &mut LengthResolver,
    ) -> Vec<RecordHandle> {
        if let Some(records) = self.entries.get(&file.path) {
            return records.clone();
        }

        let record: RecordHandle = Arc::new(Mutex::new(FileRecord::pending(file)));
        self.entries
            .insert(file.path.clone(), vec![Arc::clone(&record)]);
        resolver.request(ResolveJob {
            path: file.path.clone(),
            kind: file.kind,
        });
        vec![record]
    }

    pub fn get(&self, path: &Path) -> Option<&[RecordHandle]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    /// Write a finished duration into every record cached under its path.
    /// Returns how many records were updated.
    pub fn apply(&self, resolution: &Resolution) -> usize {
        let Some(records) = self.get(&resolution.path) else {
            return 0;
        };
        let mut updated = 0;
        for record in records {
            if let Ok(mut r) = record.lock() {
                r.length = resolution.length;
                updated += 1;
            }
        }
        updated
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
