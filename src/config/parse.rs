//! Mkfile parsing and discovery
//!
//! Line grammar:
//!
//! ```text
//! # comment                      ignored
//! NAME = value                   variable (also `NAME := value`)
//! .DEFAULT_GOAL = task           task to run when none is requested
//! .SHELL = bash -c               command interpreter
//! name: prereq1 prereq2 ## text  task header with optional description
//! <tab or spaces>command         command line of the open task
//! <blank>                        closes the open task
//! ```
//!
//! Headers whose name starts with `.` (`.PHONY` and friends) are accepted
//! and ignored, together with their command lines.

use crate::config::types::{Redeclaration, Task, Taskfile};
use crate::error::{ConfigError, ConfigResult, MkrunError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Declaration file names to search for, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["Mkfile", "mkfile"];

/// Marker that starts a help description on a header line
pub const DESCRIPTION_MARKER: &str = "##";

/// Find the Mkfile by searching current and parent directories
pub fn find_config_file() -> Result<PathBuf, MkrunError> {
    Ok(find_config_file_from(env::current_dir()?)?)
}

/// Find the Mkfile starting from a specific directory
pub fn find_config_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in CONFIG_FILE_NAMES {
            let config_path = current_dir.join(file_name);
            searched_paths.push(config_path.display().to_string());

            if config_path.is_file() {
                return Ok(config_path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(searched_paths.join(", "))),
        }
    }
}

/// Parse an Mkfile from a path
pub fn parse_taskfile_file(path: &Path) -> Result<Taskfile, MkrunError> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_taskfile(&contents)?)
}

/// Parse an Mkfile with automatic file discovery
pub fn parse_taskfile_auto() -> Result<(Taskfile, PathBuf), MkrunError> {
    let path = find_config_file()?;
    let taskfile = parse_taskfile_file(&path)?;
    Ok((taskfile, path))
}

/// What the parser is currently collecting command lines for
enum Open {
    Nothing,
    Task(String),
    Special,
}

/// Parse declarations from a string
pub fn parse_taskfile(text: &str) -> ConfigResult<Taskfile> {
    let mut taskfile = Taskfile::default();
    let mut open = Open::Nothing;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end();

        if line.trim().is_empty() {
            open = Open::Nothing;
            continue;
        }

        if raw.starts_with([' ', '\t']) {
            match &open {
                Open::Task(name) => {
                    if let Some(task) = taskfile.tasks.get_mut(name) {
                        task.command_lines.push(line.trim_start().to_string());
                    }
                }
                Open::Special => {}
                Open::Nothing => {
                    return Err(ConfigError::parse(
                        line_no,
                        "command line outside of a task",
                    ))
                }
            }
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        if let Some((name, value)) = split_assignment(line) {
            apply_assignment(&mut taskfile, name, value, line_no)?;
            open = Open::Nothing;
            continue;
        }

        let task = parse_header(line, line_no)?;
        if task.name.starts_with('.') {
            open = Open::Special;
            continue;
        }

        if taskfile.tasks.contains_key(&task.name) {
            taskfile.redeclarations.push(Redeclaration {
                name: task.name.clone(),
                line: line_no,
            });
        }
        open = Open::Task(task.name.clone());
        // Last declaration wins, the first one keeps its listing position.
        taskfile.tasks.insert(task.name.clone(), task);
    }

    Ok(taskfile)
}

/// Split `NAME = value` or `NAME := value`
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let eq = line.find('=')?;
    let lhs = &line[..eq];
    let name = lhs.strip_suffix(':').unwrap_or(lhs).trim();

    // A ':' left of '=' that isn't part of ':=' makes this a header.
    if name.contains(':') || !is_variable_name(name) {
        return None;
    }

    Some((name, line[eq + 1..].trim()))
}

fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '.' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn apply_assignment(
    taskfile: &mut Taskfile,
    name: &str,
    value: &str,
    line_no: usize,
) -> ConfigResult<()> {
    match name {
        ".DEFAULT_GOAL" => {
            taskfile.settings.default_task = (!value.is_empty()).then(|| value.to_string());
        }
        ".SHELL" => {
            let interpreter: Vec<String> = value.split_whitespace().map(str::to_string).collect();
            if interpreter.is_empty() {
                return Err(ConfigError::parse(line_no, ".SHELL needs a program"));
            }
            taskfile.settings.interpreter = Some(interpreter);
        }
        _ if name.starts_with('.') => {
            return Err(ConfigError::parse(
                line_no,
                format!("unknown directive '{}'", name),
            ));
        }
        _ => {
            taskfile
                .variables
                .insert(name.to_string(), value.to_string());
        }
    }
    Ok(())
}

/// Parse `name: prereq1 prereq2 ## description`
fn parse_header(line: &str, line_no: usize) -> ConfigResult<Task> {
    let (head, description) = match line.find(DESCRIPTION_MARKER) {
        Some(i) => (&line[..i], Some(line[i + DESCRIPTION_MARKER.len()..].trim())),
        None => (line, None),
    };
    let head = head.find('#').map_or(head, |i| &head[..i]);

    let colon = head.find(':').ok_or_else(|| {
        ConfigError::parse(
            line_no,
            format!("expected a task header or assignment, found '{}'", line.trim()),
        )
    })?;

    let name = head[..colon].trim();
    if name.is_empty() {
        return Err(ConfigError::parse(line_no, "missing task name before ':'"));
    }
    if name.contains(char::is_whitespace) {
        return Err(ConfigError::parse(
            line_no,
            format!("expected a single task name before ':', found '{}'", name),
        ));
    }

    let mut task = Task::new(name, line_no);
    for prereq in head[colon + 1..].split_whitespace() {
        if prereq.contains(':') {
            return Err(ConfigError::parse(
                line_no,
                format!("unexpected ':' in prerequisite '{}'", prereq),
            ));
        }
        task.prerequisites.push(prereq.to_string());
    }
    task.description = description
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Ok(task)
}
