//! Main CLI application

use crate::cli::help::{print_help, HELP_TASK};
use crate::config::{parse_taskfile_auto, parse_taskfile_file, Taskfile};
use crate::error::MkrunError;
use crate::runner::{run_task, Context, Verbosity};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// CLI application
pub struct App {
    /// Parsed declarations
    taskfile: Taskfile,
    /// Mkfile path
    config_path: PathBuf,
}

impl App {
    /// Create a new app by discovering the Mkfile
    pub fn new() -> Result<Self, MkrunError> {
        let (taskfile, config_path) = parse_taskfile_auto()?;
        Ok(App {
            taskfile,
            config_path,
        })
    }

    /// Create app with a specific Mkfile
    pub fn with_config_file(path: PathBuf) -> Result<Self, MkrunError> {
        let taskfile = parse_taskfile_file(&path)?;
        Ok(App {
            taskfile,
            config_path: path,
        })
    }

    /// Run the task requested by `matches`
    pub fn run(&self, matches: &ArgMatches) -> Result<(), MkrunError> {
        let ctx = self.context(matches)?;

        for redeclared in &self.taskfile.redeclarations {
            ctx.print_warn(&format!(
                "{}:{}: task '{}' redeclared, later declaration wins",
                self.config_path.display(),
                redeclared.line,
                redeclared.name
            ));
        }

        let task_name = self.requested_task(matches);
        ctx.print_debug(&format!(
            "Using {} (task: {})",
            self.config_path.display(),
            task_name
        ));

        if task_name == HELP_TASK {
            print_help(&self.taskfile);
            return Ok(());
        }

        run_task(&self.taskfile, &task_name, &ctx)
    }

    /// Task named on the command line, else the configured default
    fn requested_task(&self, matches: &ArgMatches) -> String {
        if matches.get_flag("list") {
            return HELP_TASK.to_string();
        }
        matches
            .get_one::<String>("task")
            .cloned()
            .or_else(|| self.taskfile.settings.default_task.clone())
            .unwrap_or_else(|| HELP_TASK.to_string())
    }

    /// Build the execution context from the Mkfile and flags
    fn context(&self, matches: &ArgMatches) -> Result<Context, MkrunError> {
        let mut ctx = Context::new()
            .with_working_dir(config_dir(&self.config_path))
            .with_vars(self.taskfile.variables.clone())?
            .with_verbosity(get_verbosity(matches))
            .with_dry_run(matches.get_flag("dry-run"));

        if let Some(interpreter) = &self.taskfile.settings.interpreter {
            ctx = ctx.with_interpreter(interpreter.clone());
        }

        Ok(ctx)
    }
}

/// Build the clap command
pub fn build_command() -> Command {
    Command::new("mkrun")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A small Makefile-style task runner")
        .arg(
            Arg::new("task")
                .value_name("TASK")
                .help("Task to run (default: .DEFAULT_GOAL, else help)"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Path to the Mkfile"),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("List described tasks and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Print commands without running them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .value_parser(value_parser!(Shell))
                .help("Print a shell completion script and exit"),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Directory commands run in: the one holding the Mkfile
fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<(), MkrunError> {
    run_from(std::env::args_os())
}

/// Run the CLI application with provided arguments
pub fn run_from<I, T>(args: I) -> Result<(), MkrunError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command().get_matches_from(args);

    if matches.get_flag("no-color") {
        colored::control::set_override(false);
    }

    if let Some(shell) = matches.get_one::<Shell>("completions") {
        clap_complete::generate(*shell, &mut build_command(), "mkrun", &mut io::stdout());
        return Ok(());
    }

    let app = match matches.get_one::<PathBuf>("file") {
        Some(path) => App::with_config_file(path.clone())?,
        None => App::new()?,
    };

    app.run(&matches)
}
