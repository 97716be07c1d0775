//! Commit search data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `branch`: Branch resolution and reachability
//! - `core`: Shared utilities (pager wrapper, debug logging)
//! - `objects`: Commit snapshot types
//! - `search`: Query tokenizer, parser and matcher

pub mod branch;
pub mod core;
pub mod objects;
pub mod search;
