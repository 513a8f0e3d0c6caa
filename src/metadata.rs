//! File metadata: the per-run record cache and the background duration
//! resolver that fills it in.

mod cache;
mod probe;
mod resolver;
mod thread;
mod types;

pub use cache::FileMetadataCache;
pub use resolver::LengthResolver;
pub use types::{Length, RecordHandle, Resolution};
