//! Command execution
//!
//! This module handles running a single command line through the interpreter.

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{interpolate, Context};
use std::process::{Command as StdCommand, Stdio};

/// Prefix that keeps a command line from being echoed
pub const SILENT_PREFIX: char = '@';

/// A command line ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Text handed to the interpreter
    pub exec: String,

    /// Whether the line is echoed before it runs
    pub echo: bool,
}

impl CommandLine {
    /// Interpolate a raw command line and strip its `@` prefix
    pub fn prepare(task_name: &str, raw: &str, ctx: &Context) -> ExecutionResult<Self> {
        let (echo, body) = match raw.strip_prefix(SILENT_PREFIX) {
            Some(rest) => (false, rest.trim_start()),
            None => (true, raw),
        };

        let exec = interpolate(body, &ctx.vars).map_err(|source| ExecutionError::Interpolation {
            task: task_name.to_string(),
            source,
        })?;

        Ok(CommandLine { exec, echo })
    }
}

/// Execute a command line of `task_name` in the given context
pub fn execute_command(task_name: &str, cmd: &CommandLine, ctx: &Context) -> ExecutionResult<()> {
    if ctx.dry_run {
        println!("{}", cmd.exec);
        return Ok(());
    }

    if cmd.echo {
        ctx.print_command(&cmd.exec);
    }

    let (program, interpreter_args) = match ctx.interpreter.split_first() {
        Some(split) => split,
        None => {
            return Err(ExecutionError::Spawn {
                command: cmd.exec.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "no interpreter"),
            })
        }
    };

    let mut command = StdCommand::new(program);

    // Add interpreter args (e.g., "-c" for sh/bash)
    command.args(interpreter_args);
    command.arg(&cmd.exec);
    command.current_dir(&ctx.working_dir);

    command.stdin(Stdio::inherit());
    command.stdout(Stdio::inherit());
    command.stderr(Stdio::inherit());

    for (key, value) in &ctx.vars {
        command.env(key, value);
    }

    let status = command.status().map_err(|source| ExecutionError::Spawn {
        command: cmd.exec.clone(),
        source,
    })?;

    if !status.success() {
        return Err(ExecutionError::CommandFailed {
            task: task_name.to_string(),
            command: cmd.exec.clone(),
            code: status.code(),
        });
    }

    Ok(())
}
