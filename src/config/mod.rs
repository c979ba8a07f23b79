//! Declaration file parsing
//!
//! This module handles discovery and parsing of Mkfiles into the
//! in-memory task table.

pub mod parse;
pub mod types;

// Re-export main types
pub use parse::*;
pub use types::*;
