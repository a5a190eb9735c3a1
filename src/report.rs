//! @ai:module:intent Summarize a TimeKeeper into a serializable report
//! @ai:module:layer application
//! @ai:module:public_api Report, TaskSummary
//! @ai:module:depends_on keeper, stats, confidence
//! @ai:module:stateless true

use crate::confidence::{self, ConfidenceInterval};
use crate::error::Result;
use crate::keeper::TimeKeeper;
use crate::stats;
use serde::{Deserialize, Serialize};

/// @ai:intent Descriptive statistics for one task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub task: String,
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub pstdev: f64,
    /// Sample standard deviation, absent below two samples
    #[serde(default)]
    pub stdev: Option<f64>,
    /// 95% confidence interval of the mean, absent below two samples
    #[serde(default)]
    pub confidence_interval: Option<ConfidenceInterval>,
}

impl TaskSummary {
    /// @ai:intent Summarize the samples of a single task
    /// @ai:pre samples.len() >= 1
    /// @ai:effects pure
    pub fn from_samples(task: &str, samples: &[f64]) -> Result<Self> {
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let (stdev, confidence_interval) = if samples.len() >= 2 {
            (
                Some(stats::stdev(samples)?),
                Some(confidence::confidence_interval(samples)?),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            task: task.to_string(),
            count: samples.len(),
            total: stats::total(samples),
            mean: stats::mean(samples)?,
            median: stats::median(samples)?,
            min,
            max,
            pstdev: stats::pstdev(samples)?,
            stdev,
            confidence_interval,
        })
    }
}

/// @ai:intent Complete timing report across all tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub timestamp: String,
    pub tasks: Vec<TaskSummary>,
}

impl Report {
    /// @ai:intent Build a report from every task in the keeper, in recording order
    /// @ai:effects time
    pub fn from_keeper(keeper: &TimeKeeper) -> Result<Self> {
        let tasks = keeper
            .tasks()
            .iter()
            .map(|(task, samples)| TaskSummary::from_samples(task, samples))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            tasks,
        })
    }

    pub fn task(&self, name: &str) -> Option<&TaskSummary> {
        self.tasks.iter().find(|t| t.task == name)
    }
}
