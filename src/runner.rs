//! @ai:module:intent Time external commands into a TimeKeeper
//! @ai:module:layer application
//! @ai:module:public_api CommandRunner, CommandRunnerTrait
//! @ai:module:depends_on keeper, config, error
//! @ai:module:stateless true

use crate::config::{RunConfig, TaskConfig};
use crate::error::{Error, Result};
use crate::keeper::TimeKeeper;
use std::process::{Command, Stdio};

/// @ai:intent Trait for running a configured task into a keeper
pub trait CommandRunnerTrait {
    /// @ai:intent Run warm-ups, then record one sample per successful repetition
    fn run_task(&self, keeper: &mut TimeKeeper, task: &TaskConfig, run: &RunConfig)
        -> Result<()>;
}

/// @ai:intent Runs commands as child processes, discarding their output unless asked
pub struct CommandRunner {
    inherit_output: bool,
}

impl CommandRunner {
    /// @ai:intent Create a runner that silences child output
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            inherit_output: false,
        }
    }

    /// @ai:intent Let child processes write to this process's stdout and stderr
    pub fn with_inherited_output(mut self, inherit: bool) -> Self {
        self.inherit_output = inherit;
        self
    }

    /// @ai:intent Spawn the command once and wait for it
    /// @ai:post Err when the command cannot start or exits non-zero
    /// @ai:effects process
    fn execute(&self, task: &TaskConfig) -> Result<()> {
        let (program, args) = task.command.split_first().ok_or_else(|| Error::CommandFailed {
            task: task.name.clone(),
            reason: "empty command".to_string(),
        })?;

        let stdio = || {
            if self.inherit_output {
                Stdio::inherit()
            } else {
                Stdio::null()
            }
        };

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(stdio())
            .stderr(stdio())
            .status()
            .map_err(|e| Error::CommandFailed {
                task: task.name.clone(),
                reason: format!("could not start {}: {}", program, e),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                task: task.name.clone(),
                reason: format!("exited with {}", status),
            })
        }
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunnerTrait for CommandRunner {
    /// @ai:effects process, time, state:write
    fn run_task(
        &self,
        keeper: &mut TimeKeeper,
        task: &TaskConfig,
        run: &RunConfig,
    ) -> Result<()> {
        let warmup = task.warmup(run);
        let repetitions = task.repetitions(run);

        for _ in 0..warmup {
            self.execute(task)?;
        }
        if warmup > 0 {
            tracing::debug!(task = %task.name, warmup, "warm-up complete");
        }

        for repetition in 1..=repetitions {
            keeper.time(&task.name, || self.execute(task))?;
            tracing::info!("{} [{}/{}]", task.name, repetition, repetitions);
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn task(name: &str, command: &[&str]) -> TaskConfig {
        TaskConfig {
            name: name.to_string(),
            command: command.iter().map(|s| s.to_string()).collect(),
            repetitions: Some(3),
            warmup: Some(1),
        }
    }

    #[test]
    fn test_successful_command_records_each_repetition() {
        let mut keeper = TimeKeeper::new();
        CommandRunner::new()
            .run_task(&mut keeper, &task("ok", &["true"]), &RunConfig::default())
            .unwrap();

        assert_eq!(keeper.samples("ok").unwrap().len(), 3);
    }

    #[test]
    fn test_failing_command_records_nothing() {
        let mut keeper = TimeKeeper::new();
        let mut failing = task("fail", &["false"]);
        failing.warmup = Some(0);

        let err = CommandRunner::new()
            .run_task(&mut keeper, &failing, &RunConfig::default())
            .unwrap_err();

        assert!(matches!(err, Error::CommandFailed { .. }));
        assert!(keeper.samples("fail").is_err());
    }

    #[test]
    fn test_missing_program_is_reported() {
        let mut keeper = TimeKeeper::new();
        let err = CommandRunner::new()
            .run_task(
                &mut keeper,
                &task("missing", &["definitely-not-a-real-program-xyz"]),
                &RunConfig::default(),
            )
            .unwrap_err();

        assert!(err.to_string().contains("could not start"));
        assert!(keeper.is_empty());
    }
}
