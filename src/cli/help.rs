//! Help listing
//!
//! Lists every described task, in declaration order, as two aligned columns.

use crate::config::Taskfile;
use colored::Colorize;

/// Name of the pseudo-task that prints the listing
pub const HELP_TASK: &str = "help";

/// Minimum width of the task name column
pub const NAME_WIDTH: usize = 20;

/// Render the listing, one line per described task
pub fn render_help(taskfile: &Taskfile) -> String {
    let mut out = String::new();
    for task in taskfile.listed_tasks() {
        let name = format!("{:<width$}", task.name, width = NAME_WIDTH);
        let description = task.description.as_deref().unwrap_or_default();
        out.push_str(&format!("{} {}\n", name.cyan(), description));
    }
    out
}

/// Print the listing to stdout
pub fn print_help(taskfile: &Taskfile) {
    print!("{}", render_help(taskfile));
}
