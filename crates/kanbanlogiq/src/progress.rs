//! Completion percentages and their status classification.
//!
//! Everything here is a pure function of its inputs. The rules are kept
//! exactly as the UI has always shown them:
//!
//! - a zero total is treated as a total of one, so the result is never NaN
//! - "complete" means a percentage of exactly `100.0`, with no rounding
//! - nothing is clamped; over-fulfilment yields percentages above 100

use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A `(total, completed)` pair: units ordered vs. shipped, or tray capacity
/// vs. units filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuantityPair {
    /// The quantity that counts as 100 %.
    pub total: f64,
    /// The quantity done so far.
    pub completed: f64,
}

impl QuantityPair {
    /// Create a new pair.
    #[must_use]
    pub fn new(total: f64, completed: f64) -> Self {
        Self { total, completed }
    }

    /// Completion percentage of this pair. See [`percent`].
    #[must_use]
    pub fn percent(&self) -> f64 {
        percent(self.completed, self.total)
    }

    /// Check if more was completed than the total allows.
    #[must_use]
    pub fn is_overfilled(&self) -> bool {
        self.completed > self.total
    }
}

impl Add for QuantityPair {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total: self.total + rhs.total,
            completed: self.completed + rhs.completed,
        }
    }
}

impl Sum for QuantityPair {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Percentage of `total` that `completed` represents.
///
/// A `total` of exactly zero is replaced by one. Negative inputs are not
/// rejected.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn percent(completed: f64, total: f64) -> f64 {
    let total = if total == 0.0 { 1.0 } else { total };
    completed * 100.0 / total
}

/// Three-level status derived from a completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    /// Nothing done yet.
    Empty,
    /// Partially done.
    InProgress,
    /// Exactly 100 %.
    Complete,
}

impl StatusLevel {
    /// Colour token used by the stylesheet.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Empty => "bg-red",
            Self::InProgress => "bg-orange",
            Self::Complete => "bg-green",
        }
    }

    /// Full CSS class list for an animated progress bar at this level.
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Empty => "active bg-red",
            Self::InProgress => "active bg-orange",
            Self::Complete => "active bg-green",
        }
    }
}

impl std::fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Classify a percentage.
///
/// Only an exact `100.0` is [`StatusLevel::Complete`]; 99.99 is still in
/// progress and so is 150.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn classify(percent: f64) -> StatusLevel {
    if percent == 100.0 {
        StatusLevel::Complete
    } else if percent > 0.0 {
        StatusLevel::InProgress
    } else {
        StatusLevel::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_percent_zero_total_is_zero() {
        assert_close(percent(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_percent_zero_total_divides_by_one() {
        assert_close(percent(3.0, 0.0), 300.0);
    }

    #[test]
    fn test_percent_half() {
        assert_close(percent(50.0, 100.0), 50.0);
    }

    #[test]
    fn test_percent_full_is_complete() {
        let p = percent(100.0, 100.0);
        assert_close(p, 100.0);
        assert_eq!(classify(p), StatusLevel::Complete);
    }

    #[test]
    fn test_percent_one_is_in_progress() {
        let p = percent(1.0, 100.0);
        assert_close(p, 1.0);
        assert_eq!(classify(p), StatusLevel::InProgress);
    }

    #[test]
    fn test_percent_nothing_is_empty() {
        let p = percent(0.0, 100.0);
        assert_close(p, 0.0);
        assert_eq!(classify(p), StatusLevel::Empty);
    }

    #[test]
    fn test_percent_negative_not_rejected() {
        assert_close(percent(-5.0, 10.0), -50.0);
        assert_eq!(classify(-50.0), StatusLevel::Empty);
    }

    #[test]
    fn test_classify_uses_exact_equality() {
        assert_eq!(classify(99.999_999), StatusLevel::InProgress);
        assert_eq!(classify(100.000_001), StatusLevel::InProgress);
        assert_eq!(classify(150.0), StatusLevel::InProgress);
    }

    #[test]
    fn test_status_level_css_class() {
        assert_eq!(StatusLevel::Complete.css_class(), "active bg-green");
        assert_eq!(StatusLevel::InProgress.css_class(), "active bg-orange");
        assert_eq!(StatusLevel::Empty.css_class(), "active bg-red");
    }

    #[test]
    fn test_status_level_color_matches_class() {
        for level in [
            StatusLevel::Empty,
            StatusLevel::InProgress,
            StatusLevel::Complete,
        ] {
            assert!(level.css_class().ends_with(level.color()));
        }
    }

    #[test]
    fn test_status_level_display() {
        assert_eq!(StatusLevel::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn test_quantity_pair_sum() {
        let total: QuantityPair = [
            QuantityPair::new(10.0, 5.0),
            QuantityPair::new(20.0, 15.0),
        ]
        .into_iter()
        .sum();
        assert_close(total.total, 30.0);
        assert_close(total.completed, 20.0);
    }

    #[test]
    fn test_quantity_pair_empty_sum_is_default() {
        let total: QuantityPair = std::iter::empty().sum();
        assert_eq!(total, QuantityPair::default());
        assert_close(total.percent(), 0.0);
    }

    #[test]
    fn test_quantity_pair_overfilled() {
        assert!(QuantityPair::new(10.0, 11.0).is_overfilled());
        assert!(!QuantityPair::new(10.0, 10.0).is_overfilled());
        assert_eq!(classify(QuantityPair::new(10.0, 11.0).percent()), StatusLevel::InProgress);
    }
}
