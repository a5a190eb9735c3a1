//! @ai:module:intent Accumulate elapsed-time samples per named task and query their statistics
//! @ai:module:layer application
//! @ai:module:public_api TimeKeeper, Stopwatch
//! @ai:module:depends_on registry, stats, confidence, error
//! @ai:module:stateless false
//!
//! # Example
//!
//! ```rust
//! use timekeeper::TimeKeeper;
//!
//! let mut keeper = TimeKeeper::new();
//! let parsed: Result<u32, std::num::ParseIntError> = keeper.time("parse", || "42".parse());
//! assert_eq!(parsed.unwrap(), 42);
//! assert_eq!(keeper.samples("parse").unwrap().len(), 1);
//! ```

use crate::confidence::{self, ConfidenceInterval};
use crate::error::{Error, Result};
use crate::registry::TaskMap;
use crate::stats;
use std::fmt;
use std::time::{Duration, Instant};

/// @ai:intent Records elapsed seconds per task name
#[derive(Debug, Clone, Default)]
pub struct TimeKeeper {
    tasks: TaskMap<Vec<f64>>,
}

impl TimeKeeper {
    /// @ai:intent Create an accumulator with no tasks
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            tasks: TaskMap::new(),
        }
    }

    /// @ai:intent Run `work` and record its elapsed time under `task` if it succeeds
    /// @ai:post on Err, no sample is recorded and the error is returned unchanged
    /// @ai:effects time, state:write
    pub fn time<T, E, F>(&mut self, task: &str, work: F) -> std::result::Result<T, E>
    where
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let start = Instant::now();
        let value = work()?;
        self.record_duration(task, start.elapsed());
        Ok(value)
    }

    /// @ai:intent Start a stopwatch that records under `task` only when stopped
    /// @ai:effects time
    pub fn start<'a>(&'a mut self, task: &str) -> Stopwatch<'a> {
        Stopwatch {
            keeper: self,
            task: task.to_string(),
            start: Instant::now(),
            stopped: false,
        }
    }

    /// @ai:intent Append an externally measured sample in seconds
    /// @ai:effects state:write
    pub fn record(&mut self, task: &str, seconds: f64) {
        tracing::debug!(task, seconds, "recorded sample");
        self.tasks.get_or_insert_default(task).push(seconds);
    }

    /// @ai:intent Append an externally measured duration
    /// @ai:effects state:write
    pub fn record_duration(&mut self, task: &str, elapsed: Duration) {
        self.record(task, elapsed.as_secs_f64());
    }

    /// @ai:intent Raw samples recorded for a task, in recording order
    pub fn samples(&self, task: &str) -> Result<&[f64]> {
        self.tasks
            .get(task)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownTask(task.to_string()))
    }

    /// Number of distinct tasks tracked.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// @ai:intent Whole-registry snapshot, task name to samples
    pub fn tasks(&self) -> &TaskMap<Vec<f64>> {
        &self.tasks
    }

    pub fn total(&self, task: &str) -> Result<f64> {
        self.samples(task).map(stats::total)
    }

    pub fn mean(&self, task: &str) -> Result<f64> {
        stats::mean(self.samples(task)?)
    }

    pub fn median(&self, task: &str) -> Result<f64> {
        stats::median(self.samples(task)?)
    }

    pub fn median_low(&self, task: &str) -> Result<f64> {
        stats::median_low(self.samples(task)?)
    }

    pub fn median_high(&self, task: &str) -> Result<f64> {
        stats::median_high(self.samples(task)?)
    }

    /// @ai:intent Single most common sample; fails with NoUniqueMode on ties
    pub fn mode(&self, task: &str) -> Result<f64> {
        stats::mode(self.samples(task)?)
    }

    pub fn multimode(&self, task: &str) -> Result<Vec<f64>> {
        self.samples(task).map(stats::multimode)
    }

    pub fn pvariance(&self, task: &str) -> Result<f64> {
        stats::pvariance(self.samples(task)?)
    }

    /// @ai:intent Sample variance; needs at least two samples
    pub fn variance(&self, task: &str) -> Result<f64> {
        stats::variance(self.samples(task)?)
    }

    pub fn pstdev(&self, task: &str) -> Result<f64> {
        stats::pstdev(self.samples(task)?)
    }

    pub fn stdev(&self, task: &str) -> Result<f64> {
        stats::stdev(self.samples(task)?)
    }

    /// @ai:intent 95% confidence interval of the mean for one task
    pub fn confidence_interval(&self, task: &str) -> Result<ConfidenceInterval> {
        confidence::confidence_interval(self.samples(task)?)
    }

    pub fn each_total(&self) -> TaskMap<f64> {
        self.tasks.map_values(|samples| stats::total(samples))
    }

    pub fn each_mean(&self) -> Result<TaskMap<f64>> {
        self.each(stats::mean)
    }

    pub fn each_median(&self) -> Result<TaskMap<f64>> {
        self.each(stats::median)
    }

    pub fn each_median_low(&self) -> Result<TaskMap<f64>> {
        self.each(stats::median_low)
    }

    pub fn each_median_high(&self) -> Result<TaskMap<f64>> {
        self.each(stats::median_high)
    }

    pub fn each_mode(&self) -> Result<TaskMap<f64>> {
        self.each(stats::mode)
    }

    pub fn each_multimode(&self) -> TaskMap<Vec<f64>> {
        self.tasks.map_values(|samples| stats::multimode(samples))
    }

    pub fn each_pvariance(&self) -> Result<TaskMap<f64>> {
        self.each(stats::pvariance)
    }

    pub fn each_variance(&self) -> Result<TaskMap<f64>> {
        self.each(stats::variance)
    }

    pub fn each_pstdev(&self) -> Result<TaskMap<f64>> {
        self.each(stats::pstdev)
    }

    pub fn each_stdev(&self) -> Result<TaskMap<f64>> {
        self.each(stats::stdev)
    }

    pub fn each_confidence_interval(&self) -> Result<TaskMap<ConfidenceInterval>> {
        self.each(confidence::confidence_interval)
    }

    /// @ai:intent Apply a fallible statistic to every task
    /// @ai:post the first failing task fails the whole batch
    /// @ai:effects pure
    fn each<T, F>(&self, statistic: F) -> Result<TaskMap<T>>
    where
        F: Fn(&[f64]) -> Result<T>,
    {
        tracing::trace!(tasks = self.tasks.len(), "computing statistic for every task");
        self.tasks
            .iter()
            .map(|(task, samples)| statistic(samples.as_slice()).map(|value| (task.to_string(), value)))
            .collect()
    }
}

impl fmt::Display for TimeKeeper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tasks)
    }
}

/// @ai:intent Guard measuring one run of a task, recorded only via `stop`
/// @ai:invariant dropping without `stop` records nothing
#[must_use = "a stopwatch records nothing unless `stop` is called"]
pub struct Stopwatch<'a> {
    keeper: &'a mut TimeKeeper,
    task: String,
    start: Instant,
    stopped: bool,
}

impl Stopwatch<'_> {
    /// @ai:intent Record the elapsed time and return it
    /// @ai:effects time, state:write
    pub fn stop(mut self) -> Duration {
        let elapsed = self.start.elapsed();
        self.keeper.record_duration(&self.task, elapsed);
        self.stopped = true;
        elapsed
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn task(&self) -> &str {
        &self.task
    }
}

impl Drop for Stopwatch<'_> {
    fn drop(&mut self) {
        if !self.stopped {
            tracing::debug!(task = %self.task, "stopwatch dropped without stop, sample discarded");
        }
    }
}
