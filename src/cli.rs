//! Command-line definition and the command runner

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use gfc_lib::{Gruntfile, GruntfileError, Result, SessionOptions, TaskConfig};

/// gfc - edit Gruntfile.js task configuration without reformatting it
#[derive(Parser, Debug)]
#[command(name = "gfc", version, about)]
pub struct Cli {
    /// Gruntfile to edit (defaults to $GRUNTFILE or Gruntfile.js)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Write the result here instead of back to the gruntfile
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Session options as JSON (`file`, `dest`); flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the diff instead of saving
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List configured tasks
    Tasks {
        /// Print the task index as JSON, with locations
        #[arg(long)]
        json: bool,
    },

    /// Add a task to grunt.initConfig (default config `{}`)
    #[command(group(ArgGroup::new("value").args(["json", "raw"])))]
    Add {
        name: String,
        /// Task config as JSON, rendered in the file's style
        #[arg(long)]
        json: Option<String>,
        /// Task config as JavaScript, inserted as written
        #[arg(long)]
        raw: Option<String>,
    },

    /// Remove a task from grunt.initConfig
    Remove { name: String },

    /// Append tasks to a grunt.registerTask alias
    Register {
        alias: String,
        #[arg(required = true)]
        tasks: Vec<String>,
    },

    /// Print the gruntfile
    Print,
}

impl Command {
    /// Whether the command can change the file
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Add { .. } | Command::Remove { .. } | Command::Register { .. }
        )
    }
}

/// Run one command, writing its output to `out` and notes to `err`
///
/// Mutating commands save once at the end, and only when the text changed.
/// With `--dry-run` they print the diff instead.
pub fn run(cli: Cli, out: &mut impl Write, err: &mut impl Write) -> Result<()> {
    let mut options = match &cli.config {
        Some(path) => SessionOptions::load(path)?,
        None => SessionOptions::default(),
    };
    if let Some(file) = cli.file {
        options.file = Some(file);
    }
    if let Some(output) = cli.output {
        options.dest = Some(output);
    }
    options.autosave = false;

    let mut gruntfile = Gruntfile::new(options)?;
    let mutates = cli.command.mutates();
    let stdout = |e| GruntfileError::io_error("<stdout>", e);

    match cli.command {
        Command::Tasks { json } => {
            if json {
                let text = serde_json::to_string_pretty(gruntfile.tasks())
                    .map_err(|e| GruntfileError::InvalidOptions(e.to_string()))?;
                writeln!(out, "{}", text).map_err(stdout)?;
            } else {
                for name in gruntfile.task_names() {
                    writeln!(out, "{}", name).map_err(stdout)?;
                }
            }
        }
        Command::Add { name, json, raw } => {
            let config = match (json, raw) {
                (Some(json), _) => TaskConfig::Value(
                    serde_json::from_str(&json)
                        .map_err(|e| GruntfileError::InvalidTaskConfig(e.to_string()))?,
                ),
                (None, Some(raw)) => TaskConfig::Source(raw),
                (None, None) => TaskConfig::default(),
            };
            gruntfile.add_task(&name, config)?;
        }
        Command::Remove { name } => {
            gruntfile.remove_task(&name)?;
        }
        Command::Register { alias, tasks } => {
            gruntfile.register_task(&alias, tasks)?;
        }
        Command::Print => write!(out, "{}", gruntfile.code()).map_err(stdout)?,
    }

    if !mutates {
        return Ok(());
    }
    if cli.dry_run {
        write!(out, "{}", gruntfile.diff()).map_err(stdout)?;
        let stats = gruntfile.diff_stats();
        writeln!(err, "{} line(s) added, {} removed", stats.added, stats.removed)
            .map_err(|e| GruntfileError::io_error("<stderr>", e))?;
    } else if gruntfile.code() != gruntfile.original() {
        gruntfile.save()?;
    } else {
        tracing::info!("Nothing changed");
    }
    Ok(())
}
