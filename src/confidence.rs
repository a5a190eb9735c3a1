//! @ai:module:intent Compute 95% confidence intervals for the mean of timing samples
//! @ai:module:layer domain
//! @ai:module:public_api ConfidenceInterval, confidence_interval, t_critical
//! @ai:module:depends_on stats, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::stats;
use serde::{Deserialize, Serialize};

/// Two-sided 95% Student's t critical values for 1..=30 degrees of freedom.
const T_TABLE: [f64; 30] = [
    12.706, 4.303, 3.182, 2.776, 2.571, 2.447, 2.365, 2.306, 2.262, 2.228, 2.201, 2.179, 2.160,
    2.145, 2.131, 2.120, 2.110, 2.101, 2.093, 2.086, 2.080, 2.074, 2.069, 2.064, 2.060, 2.056,
    2.052, 2.048, 2.045, 2.042,
];

/// z-score used once the t-distribution is close enough to normal.
const Z_95: f64 = 1.96;

/// @ai:intent A 95% confidence interval around the sample mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub mean: f64,
    pub margin_of_error: f64,
}

impl ConfidenceInterval {
    /// @ai:intent Check whether a value falls inside the interval (inclusive)
    /// @ai:effects pure
    pub fn contains(&self, value: f64) -> bool {
        self.lower_bound <= value && value <= self.upper_bound
    }

    /// @ai:intent Width of the interval
    /// @ai:effects pure
    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// @ai:intent Look up the t critical value for the given degrees of freedom
/// @ai:pre df > 0
/// @ai:post df > 30 -> 1.96
/// @ai:example (1) -> 12.706
/// @ai:example (10) -> 2.228
/// @ai:example (31) -> 1.96
/// @ai:effects pure
pub fn t_critical(df: usize) -> Result<f64> {
    match df {
        0 => Err(Error::InvalidDegreesOfFreedom(df)),
        1..=30 => Ok(T_TABLE[df - 1]),
        _ => Ok(Z_95),
    }
}

/// @ai:intent Compute the 95% confidence interval for the population mean
/// @ai:pre samples.len() >= 2
/// @ai:post result.lower_bound <= result.mean <= result.upper_bound
/// @ai:effects pure
/// @ai:complexity O(n)
pub fn confidence_interval(samples: &[f64]) -> Result<ConfidenceInterval> {
    let n = samples.len();
    Error::require(2, n)?;

    let mean = stats::mean(samples)?;
    let sample_std = stats::stdev(samples)?;
    let t = t_critical(n - 1)?;

    let standard_error = sample_std / (n as f64).sqrt();
    let margin_of_error = t * standard_error;

    Ok(ConfidenceInterval {
        lower_bound: mean - margin_of_error,
        upper_bound: mean + margin_of_error,
        mean,
        margin_of_error,
    })
}
