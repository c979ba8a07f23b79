//! Task execution
//!
//! Runs a resolved plan one command at a time, stopping at the first failure.

use crate::config::{Task, Taskfile};
use crate::error::{ExecutionResult, Result};
use crate::runner::{execute_command, resolve, CommandLine, Context};

/// A resolved task with its command lines interpolated
#[derive(Debug, Clone)]
pub struct PreparedTask<'a> {
    pub task: &'a Task,
    pub commands: Vec<CommandLine>,
}

/// Resolve `task_name` and run its whole dependency chain
///
/// Resolution and interpolation of every command line finish before
/// anything runs, so unknown tasks, cycles and bad variables have no
/// side effects.
pub fn run_task(taskfile: &Taskfile, task_name: &str, ctx: &Context) -> Result<()> {
    let plan = resolve(taskfile, task_name)?;

    ctx.print_debug(&format!(
        "Execution order: {}",
        plan.iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    ));

    let prepared = prepare_plan(&plan, ctx)?;
    execute_plan(&prepared, ctx)?;
    Ok(())
}

/// Interpolate the command lines of every task in the plan
pub fn prepare_plan<'a>(
    plan: &[&'a Task],
    ctx: &Context,
) -> ExecutionResult<Vec<PreparedTask<'a>>> {
    plan.iter()
        .map(|&task| -> ExecutionResult<PreparedTask<'a>> {
            let commands = task
                .command_lines
                .iter()
                .map(|raw| CommandLine::prepare(&task.name, raw, ctx))
                .collect::<ExecutionResult<Vec<_>>>()?;
            Ok(PreparedTask { task, commands })
        })
        .collect()
}

/// Execute prepared tasks in order
pub fn execute_plan(plan: &[PreparedTask<'_>], ctx: &Context) -> ExecutionResult<()> {
    for prepared in plan {
        execute_task(prepared, ctx)?;
    }
    Ok(())
}

/// Execute the command lines of a single task
pub fn execute_task(prepared: &PreparedTask<'_>, ctx: &Context) -> ExecutionResult<()> {
    let name = &prepared.task.name;
    ctx.print_task_start(name);

    for cmd in &prepared.commands {
        if let Err(e) = execute_command(name, cmd, ctx) {
            ctx.print_error(&format!("Task '{}' stopped", name));
            return Err(e);
        }
    }

    ctx.print_task_complete(name);
    Ok(())
}
