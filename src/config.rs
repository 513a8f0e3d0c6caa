//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive scanning, duration resolution
//! and logging, and helpers to locate the config and state files.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
