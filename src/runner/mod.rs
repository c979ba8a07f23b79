//! Task execution engine
//!
//! This module handles dependency resolution, command running and the
//! sequential, first-failure-aborts executor.

pub mod command;
pub mod context;
pub mod interpolate;
pub mod resolve;
pub mod task;

// Re-export main types
pub use command::*;
pub use context::*;
pub use interpolate::*;
pub use resolve::*;
pub use task::*;
