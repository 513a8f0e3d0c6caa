use std::collections::HashSet;
use std::path::Path;

use super::index::LibraryIndex;
use super::model::IndexedDirectory;

/// Render one directory as a tree row: indentation, name and file count.
pub fn tree_row(directory: &IndexedDirectory, depth: usize) -> String {
    let files = directory.audio_files.len();
    let noun = if files == 1 { "file" } else { "files" };
    format!("{}{} ({files} {noun})", "  ".repeat(depth), directory.name)
}

/// Render the whole index as indented rows, roots first, children in path
/// order underneath their parent.
///
/// Child paths that are missing from the index are skipped, and a directory is
/// never rendered twice under the same root.
pub fn tree_lines(index: &LibraryIndex) -> Vec<String> {
    let mut lines = Vec::new();

    for root in index.roots() {
        let mut seen: HashSet<&Path> = HashSet::new();
        let mut stack: Vec<(&IndexedDirectory, usize)> = vec![(root, 0)];

        while let Some((dir, depth)) = stack.pop() {
            if !seen.insert(dir.path.as_path()) {
                continue;
            }
            lines.push(tree_row(dir, depth));

            // Reverse so the smallest path is popped first.
            for child in dir.subdirectories.iter().rev() {
                if let Some(child) = index.get(child) {
                    stack.push((child, depth + 1));
                }
            }
        }
    }

    lines
}
