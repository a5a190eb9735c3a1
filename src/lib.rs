//! @ai:module:intent Timekeeper library for timing named tasks and summarizing the samples
//! @ai:module:layer application
//! @ai:module:public_api confidence, config, error, keeper, output, registry, report, runner, stats
//! @ai:module:stateless false
//!
//! # Timekeeper
//!
//! Times named units of work, keeps every elapsed-time sample per task, and derives
//! descriptive statistics (mean, median, mode, variance, 95% confidence interval).
//!
//! ## Example
//!
//! ```rust
//! use timekeeper::TimeKeeper;
//!
//! let mut keeper = TimeKeeper::new();
//! for _ in 0..3 {
//!     keeper.time("sum", || Ok::<_, std::convert::Infallible>((0..1000u64).sum::<u64>())).unwrap();
//! }
//!
//! let watch = keeper.start("sum");
//! watch.stop();
//!
//! assert_eq!(keeper.samples("sum").unwrap().len(), 4);
//! let ci = keeper.confidence_interval("sum").unwrap();
//! assert!(ci.lower_bound <= ci.upper_bound);
//! println!("{}", keeper);
//! ```

pub mod confidence;
pub mod config;
pub mod error;
pub mod keeper;
pub mod output;
pub mod registry;
pub mod report;
pub mod runner;
pub mod stats;

pub use confidence::{confidence_interval, t_critical, ConfidenceInterval};
pub use config::{RunConfig, TaskConfig, TimekeeperConfig};
pub use error::{Error, Result};
pub use keeper::{Stopwatch, TimeKeeper};
pub use output::{format_report, write_report, OutputFormat};
pub use registry::TaskMap;
pub use report::{Report, TaskSummary};
pub use runner::{CommandRunner, CommandRunnerTrait};
