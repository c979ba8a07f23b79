//! Core declaration types
//!
//! This module defines the data structures that represent a parsed Mkfile.

use indexmap::IndexMap;
use std::fmt;

/// A task declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Task name
    pub name: String,

    /// Tasks that must run before this one, in declared order
    pub prerequisites: Vec<String>,

    /// Shell command lines, in order
    pub command_lines: Vec<String>,

    /// Description shown by the help listing (hidden when absent)
    pub description: Option<String>,

    /// Line of the header that declared this task
    pub line: usize,
}

impl Task {
    /// Create an empty task declared on the given line
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Task {
            name: name.into(),
            prerequisites: Vec::new(),
            command_lines: Vec::new(),
            description: None,
            line,
        }
    }

    /// Whether this task shows up in the help listing
    pub fn is_listed(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// Runner settings declared by directives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Task to run when none is requested (`.DEFAULT_GOAL`)
    pub default_task: Option<String>,

    /// Command interpreter (`.SHELL`), e.g. `["bash", "-c"]`
    pub interpreter: Option<Vec<String>>,
}

/// A header that redeclared an existing task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redeclaration {
    pub name: String,
    pub line: usize,
}

/// A parsed Mkfile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taskfile {
    /// Tasks in declaration order
    pub tasks: IndexMap<String, Task>,

    /// Variables from `NAME = value` assignments
    pub variables: IndexMap<String, String>,

    /// Directive settings
    pub settings: Settings,

    /// Redeclared task headers, in file order
    pub redeclarations: Vec<Redeclaration>,
}

impl Taskfile {
    /// Look up a task by name
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    /// Tasks that carry a description, in declaration order
    pub fn listed_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values().filter(|t| t.is_listed())
    }
}

/// Canonical text form; parses back to an equal taskfile up to line numbers.
impl fmt::Display for Taskfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_header = false;

        if let Some(default) = &self.settings.default_task {
            writeln!(f, ".DEFAULT_GOAL = {}", default)?;
            wrote_header = true;
        }
        if let Some(interpreter) = &self.settings.interpreter {
            writeln!(f, ".SHELL = {}", interpreter.join(" "))?;
            wrote_header = true;
        }
        for (name, value) in &self.variables {
            writeln!(f, "{} = {}", name, value)?;
            wrote_header = true;
        }

        for (i, task) in self.tasks.values().enumerate() {
            if i > 0 || wrote_header {
                writeln!(f)?;
            }
            write!(f, "{}:", task.name)?;
            for prereq in &task.prerequisites {
                write!(f, " {}", prereq)?;
            }
            if let Some(desc) = &task.description {
                write!(f, " ## {}", desc)?;
            }
            writeln!(f)?;
            for line in &task.command_lines {
                writeln!(f, "\t{}", line)?;
            }
        }

        Ok(())
    }
}
