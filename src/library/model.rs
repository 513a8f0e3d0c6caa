use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The audio containers the library indexes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AudioKind {
    Mp3,
    Wav,
    Aiff,
}

impl AudioKind {
    pub const ALL: [AudioKind; 3] = [AudioKind::Mp3, AudioKind::Wav, AudioKind::Aiff];

    /// Extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            AudioKind::Mp3 => "mp3",
            AudioKind::Wav => "wav",
            AudioKind::Aiff => "aiff",
        }
    }

    /// Classify an extension (no dot). Matching is exact unless
    /// `case_insensitive` is set.
    pub fn from_extension(ext: &str, case_insensitive: bool) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            if case_insensitive {
                kind.extension().eq_ignore_ascii_case(ext)
            } else {
                kind.extension() == ext
            }
        })
    }

    pub fn from_path(path: &Path, case_insensitive: bool) -> Option<Self> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(|ext| Self::from_extension(ext, case_insensitive))
    }
}

impl fmt::Display for AudioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// Static description of one indexed audio file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFile {
    pub path: PathBuf,
    /// File name without the extension.
    pub name: String,
    pub kind: AudioKind,
}

impl AudioFile {
    pub fn new(path: PathBuf, kind: AudioKind) -> Self {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "UNKNOWN".to_string());
        Self { path, name, kind }
    }

    /// File name including the extension, which is what searches match on.
    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A directory subtree as produced by a walk, before it is flattened into the
/// index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    pub path: PathBuf,
    pub name: String,
    pub audio_files: BTreeMap<PathBuf, AudioFile>,
    pub subdirectories: BTreeMap<PathBuf, DirectoryNode>,
}

impl DirectoryNode {
    pub fn new(path: PathBuf) -> Self {
        let name = directory_name(&path);
        Self {
            path,
            name,
            audio_files: BTreeMap::new(),
            subdirectories: BTreeMap::new(),
        }
    }

    /// Number of audio files in this node and all of its descendants.
    pub fn total_audio_files(&self) -> usize {
        self.audio_files.len()
            + self
                .subdirectories
                .values()
                .map(DirectoryNode::total_audio_files)
                .sum::<usize>()
    }
}

/// One entry of the flattened index. Children are referenced by path; every
/// child path is itself a key of the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedDirectory {
    pub path: PathBuf,
    pub name: String,
    /// `None` for configured roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<PathBuf>,
    #[serde(default)]
    pub subdirectories: BTreeSet<PathBuf>,
    #[serde(default)]
    pub audio_files: BTreeMap<PathBuf, AudioFile>,
}

impl IndexedDirectory {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

pub(crate) fn directory_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
