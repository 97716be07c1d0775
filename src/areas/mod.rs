//! Storage-facing components
//!
//! - `snapshot`: Read-only commit history snapshot loaded from JSON

pub mod snapshot;
