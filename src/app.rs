//! Application module: exposes the `Explorer` model driven by the runtime.
//!
//! The model lives in `app::model` and owns the directory index, the file
//! metadata cache and the duration resolver.

mod model;

pub use model::*;
