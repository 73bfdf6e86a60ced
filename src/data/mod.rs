//! Snapshot documents and local storage
//!
//! Handles:
//! - Processed snapshot document consumed by chart/report stages
//! - Locating the latest raw snapshot and persisting processed output

pub mod snapshot;
pub mod store;

pub use snapshot::*;
pub use store::*;
