//! Error types for mkrun

use std::io;
use thiserror::Error;

/// Result type alias for mkrun operations
pub type Result<T> = std::result::Result<T, MkrunError>;

/// Main error type for mkrun
#[derive(Error, Debug)]
pub enum MkrunError {
    /// Declaration file and resolution errors
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Task execution errors
    #[error("{0}")]
    Execution(#[from] ExecutionError),

    /// Variable expansion errors
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl MkrunError {
    /// Process exit status for this error.
    ///
    /// A failed command propagates its own status (1 if it was killed by a
    /// signal); everything else exits with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            MkrunError::Execution(ExecutionError::CommandFailed { code, .. }) => code.unwrap_or(1),
            _ => 2,
        }
    }
}

/// Declaration parsing and resolution errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find Mkfile (searched: {0})")]
    NotFound(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Task '{0}' is not defined")]
    UnknownTask(String),

    #[error("Task '{prerequisite}' is not defined (required by '{task}')")]
    MissingPrerequisite { task: String, prerequisite: String },

    #[error("Circular dependency detected: {0}")]
    CyclicDependency(String),
}

impl ConfigError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        ConfigError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Task execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Task '{task}' failed: `{command}` exited with {}", describe_code(.code))]
    CommandFailed {
        task: String,
        command: String,
        code: Option<i32>,
    },

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Interpolation error in task '{task}': {source}")]
    Interpolation {
        task: String,
        #[source]
        source: InterpolationError,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Variable interpolation errors
#[derive(Error, Debug)]
pub enum InterpolationError {
    #[error("Recursive interpolation detected in '{0}'")]
    RecursiveInterpolation(String),
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// Specialized result type for interpolation operations
pub type InterpolationResult<T> = std::result::Result<T, InterpolationError>;
