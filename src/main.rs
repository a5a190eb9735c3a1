//! @ai:module:intent CLI entry point for timing commands and reporting statistics
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on config, runner, report, output

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use timekeeper::{
    output, CommandRunner, CommandRunnerTrait, Error, OutputFormat, Report, RunConfig, TaskConfig,
    TimeKeeper, TimekeeperConfig,
};

#[derive(Parser)]
#[command(name = "timekeeper")]
#[command(author, version, about = "Time commands and summarize elapsed-time statistics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time a command, or every task in a configuration file
    Run {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Task name for the trailing command (defaults to the program name)
        #[arg(short, long)]
        task: Option<String>,

        /// Number of timed repetitions
        #[arg(short = 'n', long)]
        repetitions: Option<u32>,

        /// Untimed runs before measuring
        #[arg(long)]
        warmup: Option<u32>,

        /// Output format
        #[arg(long, short, value_enum)]
        format: Option<Format>,

        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show the output of the timed commands
        #[arg(long)]
        show_output: bool,

        /// Command to time
        #[arg(last = true)]
        command: Vec<String>,
    },

    /// Initialize a starter configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "timekeeper.toml")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

struct RunArgs {
    config: Option<PathBuf>,
    task: Option<String>,
    repetitions: Option<u32>,
    warmup: Option<u32>,
    format: Option<Format>,
    output: Option<PathBuf>,
    show_output: bool,
    command: Vec<String>,
}

fn main() -> ExitCode {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "timekeeper=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            task,
            repetitions,
            warmup,
            format,
            output,
            show_output,
            command,
        } => run(RunArgs {
            config,
            task,
            repetitions,
            warmup,
            format,
            output,
            show_output,
            command,
        }),
        Commands::Init { output } => init_config(&output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            match e.downcast_ref::<Error>() {
                Some(Error::CommandFailed { .. }) => ExitCode::from(1),
                _ => ExitCode::from(2),
            }
        }
    }
}

/// @ai:intent Time the requested tasks and print the report
/// @ai:effects process, fs:read, fs:write
fn run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            TimekeeperConfig::load(path)?
        }
        None => TimekeeperConfig::default(),
    };

    apply_overrides(&mut config.run, &args);

    if !args.command.is_empty() {
        let name = args
            .task
            .clone()
            .unwrap_or_else(|| program_name(&args.command[0]));
        config.tasks.push(TaskConfig {
            name,
            command: args.command.clone(),
            repetitions: None,
            warmup: None,
        });
        config.validate()?;
    }

    if config.tasks.is_empty() {
        anyhow::bail!("nothing to time: pass a command after `--` or a config with tasks");
    }

    let runner = CommandRunner::new().with_inherited_output(args.show_output);
    let mut keeper = TimeKeeper::new();

    for task in &config.tasks {
        tracing::info!(
            "Timing {} ({} repetitions)",
            task.name,
            task.repetitions(&config.run)
        );
        if let Err(e) = runner.run_task(&mut keeper, task, &config.run) {
            tracing::error!("Task {} failed: {}", task.name, e);
            return Err(e.into());
        }
    }

    let report = Report::from_keeper(&keeper)?;
    println!("{}", output::format_report(&report, config.run.format));

    if let Some(path) = &args.output {
        output::write_report(&report, config.run.format, path)?;
    }

    Ok(())
}

/// @ai:intent Command-line flags take precedence over the config file
fn apply_overrides(run: &mut RunConfig, args: &RunArgs) {
    if let Some(repetitions) = args.repetitions {
        run.repetitions = repetitions;
    }
    if let Some(warmup) = args.warmup {
        run.warmup = warmup;
    }
    if let Some(format) = args.format {
        run.format = format.into();
    }
}

fn program_name(program: &str) -> String {
    Path::new(program)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string())
}

/// @ai:intent Write a starter configuration file
/// @ai:effects fs:write
fn init_config(output: &Path) -> Result<()> {
    if output.exists() {
        tracing::warn!("{} already exists, not overwriting", output.display());
        return Ok(());
    }

    TimekeeperConfig::example().save(output)?;
    tracing::info!("Configuration written to {}", output.display());
    Ok(())
}
