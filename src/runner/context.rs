//! Execution context for task running
//!
//! The context tracks all the state needed during task execution and owns
//! the leveled diagnostics printed to stderr.

use crate::error::InterpolationResult;
use crate::runner::expand_variables;
use colored::Colorize;
use indexmap::IndexMap;
use std::env;
use std::path::PathBuf;

/// Interpreter used when the Mkfile has no `.SHELL` directive
pub const DEFAULT_INTERPRETER: &[&str] = &["sh", "-c"];

/// Execution context that tracks state during task execution
pub struct Context {
    /// Directory commands run in
    pub working_dir: PathBuf,

    /// Expanded Mkfile variables, exported to every command
    pub vars: IndexMap<String, String>,

    /// Command interpreter (e.g., ["bash", "-c"])
    pub interpreter: Vec<String>,

    /// Verbosity level
    pub verbosity: Verbosity,

    /// Print commands instead of running them
    pub dry_run: bool,
}

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

impl Context {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Context {
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            vars: IndexMap::new(),
            interpreter: DEFAULT_INTERPRETER.iter().map(|s| s.to_string()).collect(),
            verbosity: Verbosity::Normal,
            dry_run: false,
        }
    }

    /// Create a context with a specific working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    /// Set variables, expanding references between them
    pub fn with_vars(mut self, vars: IndexMap<String, String>) -> InterpolationResult<Self> {
        self.vars = expand_variables(&vars)?;
        Ok(self)
    }

    /// Set the interpreter
    pub fn with_interpreter(mut self, interpreter: Vec<String>) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", "[INFO]".green(), message);
        }
    }

    /// Print warning message
    pub fn print_warn(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", "[WARN]".yellow(), message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        if self.verbosity >= Verbosity::Quiet {
            eprintln!("{} {}", "[ERROR]".red().bold(), message);
        }
    }

    /// Print debug message (only in verbose mode)
    pub fn print_debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{} {}", "[DEBUG]".dimmed(), message);
        }
    }

    /// Echo a command line before it runs
    pub fn print_command(&self, command: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", "[RUN]".cyan(), command);
        }
    }

    /// Print task start message
    pub fn print_task_start(&self, task_name: &str) {
        self.print_info(&format!("Running task: {}", task_name));
    }

    /// Print task complete message
    pub fn print_task_complete(&self, task_name: &str) {
        self.print_debug(&format!("Task completed: {}", task_name));
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_new() {
        let ctx = Context::new();
        assert_eq!(ctx.verbosity, Verbosity::Normal);
        assert_eq!(ctx.interpreter, vec!["sh", "-c"]);
        assert!(ctx.vars.is_empty());
        assert!(!ctx.dry_run);
    }

    #[test]
    fn test_context_with_vars() {
        let mut vars = IndexMap::new();
        vars.insert("key".to_string(), "value".to_string());

        let ctx = Context::new().with_vars(vars).unwrap();
        assert_eq!(ctx.vars.get("key"), Some(&"value".to_string()));
    }

    #[test]
    fn test_context_vars_are_expanded() {
        let mut vars = IndexMap::new();
        vars.insert("BASE".to_string(), "-O2".to_string());
        vars.insert("FLAGS".to_string(), "${BASE} -g".to_string());

        let ctx = Context::new().with_vars(vars).unwrap();
        assert_eq!(ctx.vars.get("FLAGS"), Some(&"-O2 -g".to_string()));
    }

    #[test]
    fn test_verbosity_levels() {
        assert!(Verbosity::Verbose > Verbosity::Normal);
        assert!(Verbosity::Normal > Verbosity::Quiet);
        assert!(Verbosity::Quiet > Verbosity::Silent);
    }

    #[test]
    fn test_with_interpreter() {
        let ctx = Context::new().with_interpreter(vec!["bash".to_string(), "-c".to_string()]);
        assert_eq!(ctx.interpreter, vec!["bash", "-c"]);
    }

    #[test]
    fn test_with_verbosity_and_dry_run() {
        let ctx = Context::new()
            .with_verbosity(Verbosity::Verbose)
            .with_dry_run(true);
        assert_eq!(ctx.verbosity, Verbosity::Verbose);
        assert!(ctx.dry_run);
    }
}
