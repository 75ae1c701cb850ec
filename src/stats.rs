//! Descriptive statistics over sample slices
//!
//! Small, allocation-light helpers used by the QC gates. All functions are
//! generic over `num_traits::Float` so they work on `f32` and `f64` traces.
//! Empty input yields `None` rather than NaN. A NaN sample makes `median`,
//! `std_dev` and `max` NaN, so any range check on the result fails.

use num_traits::{Float, NumCast};
use std::cmp::Ordering;

/// Arithmetic mean of the samples
pub fn mean<T: Float>(data: &[T]) -> Option<T> {
    if data.is_empty() {
        return None;
    }
    let sum = data.iter().fold(T::zero(), |acc, &x| acc + x);
    <T as NumCast>::from(data.len()).map(|n| sum / n)
}

/// Median of the samples
///
/// For an even number of samples this is the mean of the two middle values.
pub fn median<T: Float>(data: &[T]) -> Option<T> {
    if data.is_empty() {
        return None;
    }
    if data.iter().any(|x| x.is_nan()) {
        return Some(T::nan());
    }
    // NaN-free, so partial_cmp is a total order here
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        let two = T::one() + T::one();
        Some((sorted[mid - 1] + sorted[mid]) / two)
    } else {
        Some(sorted[mid])
    }
}

/// Population standard deviation (no degrees-of-freedom correction)
pub fn std_dev<T: Float>(data: &[T]) -> Option<T> {
    let mu = mean(data)?;
    let sum_sq = data.iter().fold(T::zero(), |acc, &x| {
        let d = x - mu;
        acc + d * d
    });
    <T as NumCast>::from(data.len()).map(|n| (sum_sq / n).sqrt())
}

/// Largest sample value, NaN if any sample is NaN
pub fn max<T: Float>(data: &[T]) -> Option<T> {
    let (&first, rest) = data.split_first()?;
    Some(rest.iter().fold(first, |acc, &x| {
        if acc.is_nan() || x.is_nan() {
            T::nan()
        } else if x > acc {
            x
        } else {
            acc
        }
    }))
}

/// Number of samples exactly equal to zero
pub fn zero_count<T: Float>(data: &[T]) -> usize {
    data.iter().filter(|x| x.is_zero()).count()
}

/// Summary statistics of one response window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    /// Median sample value
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Maximum sample value
    pub max: f64,
}

impl WindowStats {
    /// Compute median, standard deviation and maximum of a slice
    ///
    /// Returns `None` for an empty slice.
    pub fn compute(data: &[f64]) -> Option<Self> {
        Some(Self {
            median: median(data)?,
            std_dev: std_dev(data)?,
            max: max(data)?,
        })
    }
}
