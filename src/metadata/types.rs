//! Record types and handles shared by the cache and the resolver pool.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::library::{AudioFile, AudioKind};

/// Duration state of a record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Length {
    /// Resolution was requested but has not reported back.
    Pending,
    Known(Duration),
    /// The probe failed.
    Unknown,
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Pending => f.write_str("..."),
            Length::Unknown => f.write_str("unknown"),
            Length::Known(d) => f.write_str(&format_length(*d)),
        }
    }
}

/// Format a duration as `m:ss`.
///
/// Seconds are rounded before splitting so 179.6s reads `3:00`, never `2:60`.
pub fn format_length(d: Duration) -> String {
    let total = d.as_secs_f64().round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// One audio file as shown in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub name: String,
    pub kind: AudioKind,
    pub length: Length,
    /// Row position in the listing that last displayed this record.
    pub index: Option<usize>,
}

impl FileRecord {
    pub fn pending(file: &AudioFile) -> Self {
        Self {
            path: file.path.clone(),
            name: file.name.clone(),
            kind: file.kind,
            length: Length::Pending,
            index: None,
        }
    }

    /// Columns as displayed: name, type, length.
    pub fn row(&self) -> [String; 3] {
        [
            self.name.clone(),
            self.kind.to_string(),
            self.length.to_string(),
        ]
    }
}

pub type RecordHandle = Arc<Mutex<FileRecord>>;

/// Work item for the resolver pool.
#[derive(Debug, Clone)]
pub struct ResolveJob {
    pub path: PathBuf,
    pub kind: AudioKind,
}

/// A finished probe, published on the completion channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: PathBuf,
    pub length: Length,
}
