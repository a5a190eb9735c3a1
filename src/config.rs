//! @ai:module:intent Configuration structs for timing external commands
//! @ai:module:layer infrastructure
//! @ai:module:public_api TimekeeperConfig, RunConfig, TaskConfig
//! @ai:module:stateless true

use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};

/// @ai:intent Main configuration for the timekeeper CLI
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimekeeperConfig {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub tasks: Vec<TaskConfig>,
}

/// @ai:intent Defaults applied to every task run
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,
    #[serde(default)]
    pub warmup: u32,
    #[serde(default)]
    pub format: OutputFormat,
}

/// @ai:intent A named command to time
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    pub name: String,
    pub command: Vec<String>,
    pub repetitions: Option<u32>,
    pub warmup: Option<u32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            repetitions: default_repetitions(),
            warmup: 0,
            format: OutputFormat::default(),
        }
    }
}

fn default_repetitions() -> u32 {
    5
}

impl TimekeeperConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Starter configuration written by `timekeeper init`
    /// @ai:effects pure
    pub fn example() -> Self {
        Self {
            run: RunConfig::default(),
            tasks: vec![TaskConfig {
                name: "list".to_string(),
                command: vec!["ls".to_string(), "-la".to_string()],
                repetitions: None,
                warmup: Some(1),
            }],
        }
    }

    /// @ai:intent Reject tasks that cannot be run or that share a name
    /// @ai:effects pure
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = std::collections::HashSet::new();
        for task in &self.tasks {
            if task.command.is_empty() {
                anyhow::bail!("task {} has an empty command", task.name);
            }
            if !seen.insert(task.name.as_str()) {
                anyhow::bail!("task {} is defined more than once", task.name);
            }
        }
        Ok(())
    }
}

impl TaskConfig {
    /// @ai:intent Repetitions for this task, falling back to the run default
    pub fn repetitions(&self, run: &RunConfig) -> u32 {
        self.repetitions.unwrap_or(run.repetitions)
    }

    pub fn warmup(&self, run: &RunConfig) -> u32 {
        self.warmup.unwrap_or(run.warmup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_with_defaults() {
        let config: TimekeeperConfig = toml::from_str(
            r#"
            [[tasks]]
            name = "build"
            command = ["make", "all"]
            "#,
        )
        .unwrap();

        assert_eq!(config.run.repetitions, 5);
        assert_eq!(config.run.warmup, 0);
        assert_eq!(config.run.format, OutputFormat::Text);
        assert_eq!(config.tasks[0].repetitions(&config.run), 5);
        assert_eq!(config.tasks[0].command, vec!["make", "all"]);
    }

    #[test]
    fn test_task_overrides_run_defaults() {
        let config: TimekeeperConfig = toml::from_str(
            r#"
            [run]
            repetitions = 3
            warmup = 2
            format = "json-pretty"

            [[tasks]]
            name = "test"
            command = ["cargo", "test"]
            repetitions = 10
            "#,
        )
        .unwrap();

        let task = &config.tasks[0];
        assert_eq!(task.repetitions(&config.run), 10);
        assert_eq!(task.warmup(&config.run), 2);
        assert_eq!(config.run.format, OutputFormat::JsonPretty);
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("timekeeper.toml");

        let config = TimekeeperConfig::example();
        config.save(&path).unwrap();
        let loaded = TimekeeperConfig::load(&path).unwrap();

        assert_eq!(loaded.tasks, config.tasks);
        assert_eq!(loaded.run.repetitions, config.run.repetitions);
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty_commands() {
        let task = TaskConfig {
            name: "dup".to_string(),
            command: vec!["true".to_string()],
            repetitions: None,
            warmup: None,
        };
        let duplicate = TimekeeperConfig {
            run: RunConfig::default(),
            tasks: vec![task.clone(), task.clone()],
        };
        assert!(duplicate.validate().is_err());

        let empty = TimekeeperConfig {
            run: RunConfig::default(),
            tasks: vec![TaskConfig {
                command: vec![],
                ..task
            }],
        };
        assert!(empty.validate().is_err());
    }
}
