use super::index::LibraryIndex;
use super::model::AudioFile;

/// Result of a linear scan over the index.
#[derive(Debug, Clone, Default)]
pub struct SearchHits {
    pub matches: Vec<AudioFile>,
    /// Number of files visited, matching or not.
    pub scanned: usize,
}

/// Collect every indexed file whose file name contains `term`.
///
/// Matching is a plain case-sensitive substring test on the file name
/// (extension included). An empty `term` matches everything; callers that
/// don't want that should not search. Files reachable from two index entries
/// are visited, counted and returned twice.
pub fn search(index: &LibraryIndex, term: &str) -> SearchHits {
    let mut hits = SearchHits::default();

    for directory in index.directories().values() {
        for file in directory.audio_files.values() {
            hits.scanned += 1;
            if file.basename().contains(term) {
                hits.matches.push(file.clone());
            }
        }
    }

    hits
}
