//! mkrun - a small Makefile-style task runner
//!
//! Tasks are declared in an `Mkfile` with their prerequisites, command lines
//! and an optional `##` description. mkrun resolves the prerequisites of the
//! requested task depth-first, runs every command line sequentially through
//! the shell and stops at the first failure.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;

// Re-export commonly used types
pub use error::{MkrunError, Result};

/// Current version of mkrun
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
