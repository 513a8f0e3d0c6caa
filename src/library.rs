//! Library module: walking new roots, the flattened directory index and
//! filename search.

mod display;
mod index;
mod model;
mod scan;
mod search;

pub use display::tree_lines;
pub use index::LibraryIndex;
pub use model::{AudioFile, AudioKind, DirectoryNode, IndexedDirectory};
pub use scan::build;
pub use search::search;
