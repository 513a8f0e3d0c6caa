//! The flattened directory index.
//!
//! Every directory that was ever walked is addressable by its own path, not
//! just the roots. Parent/child links are stored as paths in both directions so
//! that removal never needs to walk a tree.

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ShelfError};

use super::model::{DirectoryNode, IndexedDirectory};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryIndex {
    directories: BTreeMap<PathBuf, IndexedDirectory>,
}

impl LibraryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_directories(directories: BTreeMap<PathBuf, IndexedDirectory>) -> Self {
        Self { directories }
    }

    pub fn directories(&self) -> &BTreeMap<PathBuf, IndexedDirectory> {
        &self.directories
    }

    pub fn get(&self, path: &Path) -> Option<&IndexedDirectory> {
        self.directories.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.directories.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    /// Directories that were added as roots (no parent).
    pub fn roots(&self) -> impl Iterator<Item = &IndexedDirectory> {
        self.directories.values().filter(|d| d.is_root())
    }

    pub fn clear(&mut self) {
        self.directories.clear();
    }

    /// Flatten `node` and all of its descendants into the index, breadth first.
    ///
    /// `node` gets `parent` as its parent; every descendant gets the path of the
    /// node it was reached from. An existing entry with the same path is
    /// replaced, not merged; if it moves to a different parent it is detached
    /// from the old one. Returns the number of directories inserted.
    pub fn add_subtree(&mut self, node: DirectoryNode, parent: Option<PathBuf>) -> usize {
        let mut queue = VecDeque::from([(node, parent)]);
        let mut inserted = 0;

        while let Some((mut current, parent)) = queue.pop_front() {
            let children = std::mem::take(&mut current.subdirectories);
            let entry = IndexedDirectory {
                path: current.path.clone(),
                name: current.name,
                parent: parent.clone(),
                subdirectories: children.keys().cloned().collect(),
                audio_files: current.audio_files,
            };

            if let Some(old) = self.directories.insert(current.path.clone(), entry) {
                debug!(path = %current.path.display(), "replaced existing directory");
                // A re-parented directory must not stay listed under its old parent.
                if old.parent != parent {
                    if let Some(old_parent) = old.parent.and_then(|p| self.directories.get_mut(&p)) {
                        old_parent.subdirectories.remove(&current.path);
                    }
                }
            }
            inserted += 1;

            for (_, child) in children {
                queue.push_back((child, Some(current.path.clone())));
            }
        }

        inserted
    }

    /// Remove the directory at `path` together with everything indexed below it.
    ///
    /// Keys are matched by path components, so removing `/music` leaves
    /// `/music2` alone. The removed path is detached from its parent and from
    /// any other node still listing it as a child. Returns the removed paths in
    /// sorted order.
    pub fn remove_subtree(&mut self, path: &Path) -> Result<Vec<PathBuf>> {
        let removed = self
            .directories
            .remove(path)
            .ok_or_else(|| ShelfError::NotFound {
                path: path.to_path_buf(),
            })?;

        if let Some(parent) = removed.parent.as_deref() {
            if let Some(parent) = self.directories.get_mut(parent) {
                parent.subdirectories.remove(path);
            }
        }

        let mut gone = vec![removed.path];
        self.directories.retain(|key, _| {
            if key.starts_with(path) {
                gone.push(key.clone());
                false
            } else {
                true
            }
        });

        for dir in self.directories.values_mut() {
            dir.subdirectories.retain(|child| !child.starts_with(path));
        }

        gone.sort();
        debug!(path = %path.display(), removed = gone.len(), "removed subtree");
        Ok(gone)
    }
}
