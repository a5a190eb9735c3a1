//! @ai:module:intent Descriptive statistics over a slice of timing samples
//! @ai:module:layer domain
//! @ai:module:public_api total, mean, median, median_low, median_high, mode, multimode, pvariance, variance, pstdev, stdev
//! @ai:module:depends_on error
//! @ai:module:stateless true
//!
//! Every function takes the samples by slice and never mutates them. Functions
//! that are undefined for small inputs return [`Error::InsufficientData`].

use crate::error::{Error, Result};
use std::collections::HashMap;

/// @ai:intent Sum of all samples
/// @ai:post result == 0.0 for an empty slice
/// @ai:effects pure
pub fn total(samples: &[f64]) -> f64 {
    samples.iter().sum()
}

/// @ai:intent Arithmetic mean of the samples
/// @ai:pre samples.len() >= 1
/// @ai:effects pure
pub fn mean(samples: &[f64]) -> Result<f64> {
    Error::require(1, samples.len())?;
    Ok(shifted_mean(samples))
}

/// @ai:intent Middle value, or the average of the two middle values for even sizes
/// @ai:pre samples.len() >= 1
/// @ai:effects pure
pub fn median(samples: &[f64]) -> Result<f64> {
    let sorted = sorted(samples)?;
    let n = sorted.len();
    if n % 2 == 1 {
        Ok(sorted[n / 2])
    } else {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// @ai:intent Lower of the two middle values for even sizes
/// @ai:effects pure
pub fn median_low(samples: &[f64]) -> Result<f64> {
    let sorted = sorted(samples)?;
    let n = sorted.len();
    if n % 2 == 1 {
        Ok(sorted[n / 2])
    } else {
        Ok(sorted[n / 2 - 1])
    }
}

/// @ai:intent Upper of the two middle values for even sizes
/// @ai:effects pure
pub fn median_high(samples: &[f64]) -> Result<f64> {
    let sorted = sorted(samples)?;
    Ok(sorted[sorted.len() / 2])
}

/// @ai:intent Single most common value
/// @ai:pre samples.len() >= 1
/// @ai:post fails with NoUniqueMode when several values share the top frequency
/// @ai:effects pure
/// @ai:edge_cases all values distinct and n > 1 -> NoUniqueMode
pub fn mode(samples: &[f64]) -> Result<f64> {
    Error::require(1, samples.len())?;
    match multimode(samples).as_slice() {
        [only] => Ok(*only),
        _ => Err(Error::NoUniqueMode),
    }
}

/// @ai:intent All values tied for the highest frequency, in first-seen order
/// @ai:post result is empty only when samples is empty
/// @ai:effects pure
pub fn multimode(samples: &[f64]) -> Vec<f64> {
    let counts = frequencies(samples);
    let Some(top) = counts.iter().map(|(_, count)| *count).max() else {
        return Vec::new();
    };

    counts
        .into_iter()
        .filter(|(_, count)| *count == top)
        .map(|(value, _)| value)
        .collect()
}

/// @ai:intent Population variance (divide by n)
/// @ai:pre samples.len() >= 1
/// @ai:effects pure
pub fn pvariance(samples: &[f64]) -> Result<f64> {
    Error::require(1, samples.len())?;
    Ok(sum_of_squares(samples) / samples.len() as f64)
}

/// @ai:intent Sample variance with Bessel's correction (divide by n - 1)
/// @ai:pre samples.len() >= 2
/// @ai:effects pure
pub fn variance(samples: &[f64]) -> Result<f64> {
    Error::require(2, samples.len())?;
    Ok(sum_of_squares(samples) / (samples.len() - 1) as f64)
}

/// @ai:intent Population standard deviation
/// @ai:effects pure
pub fn pstdev(samples: &[f64]) -> Result<f64> {
    pvariance(samples).map(f64::sqrt)
}

/// @ai:intent Sample standard deviation
/// @ai:effects pure
pub fn stdev(samples: &[f64]) -> Result<f64> {
    variance(samples).map(f64::sqrt)
}

/// Mean computed relative to the first sample, so a run of identical values
/// yields exactly that value.
fn shifted_mean(samples: &[f64]) -> f64 {
    let origin = samples[0];
    let offset: f64 = samples.iter().map(|x| x - origin).sum();
    origin + offset / samples.len() as f64
}

/// Sum of squared deviations from the mean, with the rounding error of the
/// mean subtracted back out.
fn sum_of_squares(samples: &[f64]) -> f64 {
    let m = shifted_mean(samples);
    let (squares, residual) = samples.iter().fold((0.0, 0.0), |(sq, res), x| {
        let d = x - m;
        (sq + d * d, res + d)
    });
    (squares - residual * residual / samples.len() as f64).max(0.0)
}

fn sorted(samples: &[f64]) -> Result<Vec<f64>> {
    Error::require(1, samples.len())?;
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// Occurrence count per distinct value, in first-seen order.
fn frequencies(samples: &[f64]) -> Vec<(f64, usize)> {
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut counts: Vec<(f64, usize)> = Vec::new();

    for &value in samples {
        // 0.0 and -0.0 compare equal
        let key = if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() };
        match index.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_total_mean_median() {
        let samples = [1.0, 2.0, 3.0];
        assert!((total(&samples) - 6.0).abs() < EPS);
        assert!((mean(&samples).unwrap() - 2.0).abs() < EPS);
        assert!((median(&samples).unwrap() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_total_empty_is_zero() {
        assert_eq!(total(&[]), 0.0);
    }

    #[test]
    fn test_mean_empty_fails() {
        assert!(matches!(
            mean(&[]),
            Err(Error::InsufficientData { required: 1, actual: 0 })
        ));
    }

    #[test]
    fn test_median_variants_even_size() {
        let samples = [4.0, 1.0, 3.0, 2.0];
        assert!((median(&samples).unwrap() - 2.5).abs() < EPS);
        assert_eq!(median_low(&samples).unwrap(), 2.0);
        assert_eq!(median_high(&samples).unwrap(), 3.0);
    }

    #[test]
    fn test_median_variants_odd_size() {
        let samples = [5.0, 1.0, 3.0];
        assert_eq!(median(&samples).unwrap(), 3.0);
        assert_eq!(median_low(&samples).unwrap(), 3.0);
        assert_eq!(median_high(&samples).unwrap(), 3.0);
    }

    #[test]
    fn test_multimode_returns_all_ties() {
        let modes = multimode(&[1.0, 1.0, 2.0, 2.0, 3.0]);
        assert_eq!(modes, vec![1.0, 2.0]);
    }

    #[test]
    fn test_mode_fails_on_tie() {
        assert!(matches!(
            mode(&[1.0, 1.0, 2.0, 2.0, 3.0]),
            Err(Error::NoUniqueMode)
        ));
    }

    #[test]
    fn test_mode_unique() {
        assert_eq!(mode(&[3.0, 1.0, 3.0, 2.0]).unwrap(), 3.0);
        assert_eq!(mode(&[7.5]).unwrap(), 7.5);
    }

    #[test]
    fn test_mode_treats_signed_zero_as_equal() {
        assert_eq!(mode(&[0.0, -0.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_multimode_empty() {
        assert!(multimode(&[]).is_empty());
        assert!(mode(&[]).is_err());
    }

    #[test]
    fn test_variance_forms() {
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((pvariance(&samples).unwrap() - 4.0).abs() < EPS);
        assert!((pstdev(&samples).unwrap() - 2.0).abs() < EPS);
        assert!((variance(&samples).unwrap() - 32.0 / 7.0).abs() < EPS);
        assert!((stdev(&samples).unwrap() - (32.0f64 / 7.0).sqrt()).abs() < EPS);
    }

    #[test]
    fn test_single_sample() {
        let samples = [0.25];
        assert_eq!(pvariance(&samples).unwrap(), 0.0);
        assert_eq!(pstdev(&samples).unwrap(), 0.0);
        assert!(matches!(
            variance(&samples),
            Err(Error::InsufficientData { required: 2, actual: 1 })
        ));
        assert!(stdev(&samples).is_err());
    }

    #[test]
    fn test_identical_values_have_zero_spread() {
        let samples = [0.1, 0.1, 0.1];
        assert_eq!(mean(&samples).unwrap(), 0.1);
        assert_eq!(stdev(&samples).unwrap(), 0.0);
        assert_eq!(pvariance(&samples).unwrap(), 0.0);
    }
}
