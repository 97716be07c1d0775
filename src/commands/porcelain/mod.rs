//! Porcelain commands (user-facing search operations)
//!
//! ## Commands
//!
//! - `search`: Show the commits of a snapshot matching a query
//! - `explain`: Show the structured form of a query

pub mod explain;
pub mod search;
