//! Propagation policies: noise range, aggregation mode and root seeding

use crate::error::{CascadeError, Result};
use crate::random::{choose_from, RandomSource};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which ancestors feed a node's parent sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregationMode {
    /// Sum over the immediate predecessors only
    DirectPredecessors,
    /// Sum over the full ancestor closure, each ancestor counted once
    AllPredecessors,
}

impl AggregationMode {
    pub fn name(&self) -> &str {
        match self {
            AggregationMode::DirectPredecessors => "Direct Predecessors",
            AggregationMode::AllPredecessors => "All Predecessors",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggregationMode {
    type Err = CascadeError;

    /// Accepts the display names as well as `direct` / `all`, case-insensitive
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "direct" | "directpredecessors" => Ok(AggregationMode::DirectPredecessors),
            "all" | "allpredecessors" => Ok(AggregationMode::AllPredecessors),
            _ => Err(CascadeError::UnknownMode(s.to_string())),
        }
    }
}

/// Largest accepted magnitude for a state bound or root value. Sums over a
/// whole graph of such values stay far inside `i64`.
pub const MAX_BOUND: i64 = i32::MAX as i64;

fn bounded_magnitude(value: i64) -> Result<i64> {
    match value.checked_abs() {
        Some(magnitude) if magnitude <= MAX_BOUND => Ok(magnitude),
        _ => Err(CascadeError::InvalidConfig(format!(
            "value {} exceeds the supported magnitude {}",
            value, MAX_BOUND
        ))),
    }
}

/// Closed interval noise is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub lower: i64,
    pub upper: i64,
}

impl ValueRange {
    /// Build the range `[-|lower|, |upper|]` from raw user bounds.
    /// Either bound being zero is rejected, as is any magnitude above
    /// `MAX_BOUND`.
    pub fn from_bounds(upper: i64, lower: i64) -> Result<Self> {
        if upper == 0 || lower == 0 {
            return Err(CascadeError::InvalidBounds { upper, lower });
        }
        Ok(Self {
            lower: -bounded_magnitude(lower)?,
            upper: bounded_magnitude(upper)?,
        })
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    /// Uniform draw from the range. A zero draw is replaced by +1 or -1 so
    /// no node inherits its aggregate unchanged.
    pub fn draw_noise<R>(&self, rng: &mut R) -> i64
    where
        R: RandomSource + ?Sized,
    {
        match rng.int_in_range(self.lower, self.upper) {
            0 => choose_from(rng, &[1, -1]).unwrap_or(1),
            noise => noise,
        }
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// How the root value is drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RootSeed {
    /// Uniform choice from a fixed set
    Discrete(Vec<i64>),
    /// Uniform choice from `lower..upper`, zero excluded
    Span { lower: i64, upper: i64 },
}

impl Default for RootSeed {
    fn default() -> Self {
        RootSeed::Discrete(vec![1, 2, -1, -2])
    }
}

impl RootSeed {
    /// Span covering a value range, upper bound exclusive
    pub fn span_of(range: &ValueRange) -> Self {
        RootSeed::Span {
            lower: range.lower,
            upper: range.upper,
        }
    }

    /// True when no non-zero value can be drawn
    pub fn is_empty(&self) -> bool {
        match self {
            RootSeed::Discrete(values) => values.iter().all(|&v| v == 0),
            RootSeed::Span { lower, upper } => span_is_empty(*lower, *upper),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(CascadeError::EmptyRootSeed);
        }
        match self {
            RootSeed::Discrete(values) => {
                for &value in values {
                    bounded_magnitude(value)?;
                }
            }
            RootSeed::Span { lower, upper } => {
                bounded_magnitude(*lower)?;
                bounded_magnitude(*upper)?;
            }
        }
        Ok(())
    }

    pub fn draw<R>(&self, rng: &mut R) -> Result<i64>
    where
        R: RandomSource + ?Sized,
    {
        match self {
            RootSeed::Discrete(values) => {
                let non_zero: Vec<i64> = values.iter().copied().filter(|&v| v != 0).collect();
                choose_from(rng, &non_zero).ok_or(CascadeError::EmptyRootSeed)
            }
            RootSeed::Span { lower, upper } => {
                let (lower, upper) = (*lower, *upper);
                if span_is_empty(lower, upper) {
                    return Err(CascadeError::EmptyRootSeed);
                }
                if lower <= 0 && 0 < upper {
                    // One slot fewer than the span; draws at or above zero
                    // shift up by one to skip it.
                    let draw = rng.int_in_range(lower, upper - 2);
                    Ok(if draw >= 0 { draw + 1 } else { draw })
                } else {
                    Ok(rng.int_in_range(lower, upper - 1))
                }
            }
        }
    }
}

/// `lower..upper` holds no non-zero value
fn span_is_empty(lower: i64, upper: i64) -> bool {
    lower >= upper || (lower == 0 && upper == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{EntropySource, MinimalSource};

    /// Returns zero for every integer draw and a fixed index for choices
    struct ZeroSource {
        choice: usize,
    }

    impl RandomSource for ZeroSource {
        fn int_in_range(&mut self, _lower: i64, _upper: i64) -> i64 {
            0
        }
        fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
            (0..amount.min(len)).collect()
        }
        fn choose_index(&mut self, _len: usize) -> usize {
            self.choice
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("direct".parse::<AggregationMode>().unwrap(), AggregationMode::DirectPredecessors);
        assert_eq!("All Predecessors".parse::<AggregationMode>().unwrap(), AggregationMode::AllPredecessors);
        assert_eq!("all-predecessors".parse::<AggregationMode>().unwrap(), AggregationMode::AllPredecessors);
        assert!(matches!(
            "sideways".parse::<AggregationMode>(),
            Err(CascadeError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_range_from_bounds() {
        let range = ValueRange::from_bounds(5, -3).unwrap();
        assert_eq!((range.lower, range.upper), (-3, 5));

        // Signs of the raw bounds do not matter
        let flipped = ValueRange::from_bounds(-5, 3).unwrap();
        assert_eq!((flipped.lower, flipped.upper), (-3, 5));
    }

    #[test]
    fn test_zero_bounds_rejected() {
        assert!(matches!(
            ValueRange::from_bounds(0, -5),
            Err(CascadeError::InvalidBounds { upper: 0, lower: -5 })
        ));
        assert!(ValueRange::from_bounds(5, 0).is_err());
    }

    #[test]
    fn test_zero_noise_resampled() {
        let range = ValueRange::from_bounds(4, -4).unwrap();
        assert_eq!(range.draw_noise(&mut ZeroSource { choice: 0 }), 1);
        assert_eq!(range.draw_noise(&mut ZeroSource { choice: 1 }), -1);
    }

    #[test]
    fn test_noise_never_zero() {
        let range = ValueRange::from_bounds(1, -1).unwrap();
        let mut rng = EntropySource::seeded(3);
        for _ in 0..1000 {
            let noise = range.draw_noise(&mut rng);
            assert_ne!(noise, 0);
            assert!(range.contains(noise));
        }
    }

    #[test]
    fn test_root_seed_policies() {
        assert_eq!(RootSeed::default().draw(&mut MinimalSource).unwrap(), 1);

        let range = ValueRange::from_bounds(2, -2).unwrap();
        let span = RootSeed::span_of(&range);
        assert_eq!(span.draw(&mut MinimalSource).unwrap(), -2);

        let mut rng = EntropySource::seeded(5);
        let seen: std::collections::BTreeSet<i64> =
            (0..500).map(|_| span.draw(&mut rng).unwrap()).collect();
        assert_eq!(seen.into_iter().collect::<Vec<_>>(), vec![-2, -1, 1]);

        assert!(matches!(RootSeed::Discrete(vec![0]).validate(), Err(CascadeError::EmptyRootSeed)));
        assert!(RootSeed::Span { lower: 0, upper: 1 }.draw(&mut MinimalSource).is_err());
        assert!(RootSeed::Span { lower: 3, upper: 3 }.is_empty());
    }

    #[test]
    fn test_span_skips_zero_at_lower_edge() {
        let span = RootSeed::Span { lower: 0, upper: 3 };
        assert_eq!(span.draw(&mut MinimalSource).unwrap(), 1);

        let mut rng = EntropySource::seeded(8);
        for _ in 0..200 {
            let value = span.draw(&mut rng).unwrap();
            assert!(value == 1 || value == 2);
        }
    }

    #[test]
    fn test_huge_span_draws_without_listing() {
        let span = RootSeed::Span { lower: -1_000_000_000_000, upper: 1_000_000_000_000 };
        let mut rng = EntropySource::seeded(1);
        for _ in 0..100 {
            let value = span.draw(&mut rng).unwrap();
            assert_ne!(value, 0);
            assert!((-1_000_000_000_000..1_000_000_000_000).contains(&value));
        }
        assert_eq!(span.draw(&mut MinimalSource).unwrap(), -1_000_000_000_000);
        assert!(matches!(span.validate(), Err(CascadeError::InvalidConfig(_))));
    }

    #[test]
    fn test_oversized_bounds_rejected() {
        assert!(matches!(
            ValueRange::from_bounds(5, i64::MIN),
            Err(CascadeError::InvalidConfig(_))
        ));
        assert!(matches!(
            ValueRange::from_bounds(i64::MAX, -1),
            Err(CascadeError::InvalidConfig(_))
        ));

        let widest = ValueRange::from_bounds(MAX_BOUND, -MAX_BOUND).unwrap();
        assert_eq!((widest.lower, widest.upper), (-MAX_BOUND, MAX_BOUND));
        assert!(RootSeed::Discrete(vec![1, i64::MAX]).validate().is_err());
    }
}
