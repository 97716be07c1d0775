//! Commit history object types
//!
//! The searchable history is a set of commit snapshots keyed by hash, each
//! carrying its message, author, and parent hashes.

pub mod commit;
