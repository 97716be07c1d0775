//! Command implementations
//!
//! - `porcelain`: User-facing commands (search, explain)

pub mod porcelain;
