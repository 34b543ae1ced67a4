//! Stat growth engine.
//!
//! Growth is cumulative: every level from 2 up to the target level multiplies
//! a running bonus by `1 + growth_rate * curve_factor * 0.05`, where the
//! curve factor depends on where that level sits in the level range. Level 1
//! receives no compounding. The result is `base * bonus * rank_multiplier`,
//! with the multiplier floored at `0.0001`.
//!
//! Because the per-step factor varies with the curve, evaluation is a loop
//! over levels rather than a closed-form power.

use crate::breakdown::{GrowthBreakdown, GrowthStep};
use crate::level::LevelRange;
use crate::profile::StatProfile;
use crate::rank::Rank;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Per-level growth scale. Existing balancing data depends on this value.
pub const GROWTH_STEP_SCALE: f64 = 0.05;

/// Smallest rank multiplier applied; lower values are raised to it.
pub const MIN_RANK_MULTIPLIER: f64 = 0.0001;

/// Floor a rank multiplier at `MIN_RANK_MULTIPLIER`.
///
/// NaN is passed through unchanged.
pub fn floor_rank_multiplier(multiplier: f64) -> f64 {
    if MIN_RANK_MULTIPLIER > multiplier {
        MIN_RANK_MULTIPLIER
    } else {
        multiplier
    }
}

/// Run the compounding loop, reporting each step to `on_step`.
fn compound(
    profile: &StatProfile,
    level: i32,
    range: LevelRange,
    mut on_step: impl FnMut(GrowthStep),
) -> f64 {
    let mut bonus = 1.0;
    for l in 2..=level {
        let progress = range.progress(l).clamp(0.0, 1.0);
        let curve_factor = match profile.curve() {
            Some(curve) => 1.0 + curve.evaluate(progress) * profile.curve_weight(),
            None => 1.0,
        };
        let step_growth = profile.growth_rate() * curve_factor * GROWTH_STEP_SCALE;
        bonus *= 1.0 + step_growth;
        on_step(GrowthStep {
            level: l,
            progress,
            curve_factor,
            step_growth,
            bonus,
        });
    }
    bonus
}

/// Evaluate a stat at `level`.
///
/// `level` values below 1 are treated as 1. Inputs are not validated;
/// non-finite values propagate through ordinary float arithmetic.
///
/// # Examples
///
/// ```rust
/// use statcurve::{evaluate, LevelRange, Rank, StatProfile};
///
/// let profile = StatProfile::new(10.0, 1.0);
/// let range = LevelRange::new(1, 100);
///
/// assert_eq!(evaluate(&profile, 1, range, Rank::R), 10.0);
/// assert!((evaluate(&profile, 2, range, Rank::R) - 10.5).abs() < 1e-4);
/// assert!((evaluate(&profile, 3, range, Rank::R) - 11.025).abs() < 1e-4);
/// ```
pub fn evaluate(profile: &StatProfile, level: i32, range: LevelRange, rank: Rank) -> f64 {
    let level = level.max(1);
    let bonus = compound(profile, level, range, |_| {});
    profile.base() * bonus * floor_rank_multiplier(profile.rank_multiplier(rank))
}

/// Evaluate a stat at `level` and record every compounding step.
///
/// The returned `value` is bit-identical to [`evaluate`].
pub fn evaluate_detailed(
    profile: &StatProfile,
    level: i32,
    range: LevelRange,
    rank: Rank,
) -> GrowthBreakdown {
    let level = level.max(1);
    let mut breakdown = GrowthBreakdown::new(
        level,
        rank,
        profile.base(),
        floor_rank_multiplier(profile.rank_multiplier(rank)),
    );
    compound(profile, level, range, |step| breakdown.add_step(step));
    breakdown
}

/// A sampled `(level, value)` point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub level: i32,
    pub value: f64,
}

/// The level sampled at `index` out of `count` evenly spaced samples.
///
/// Interpolates between the range bounds, rounds half to even and clamps
/// into the range. Any `count` of 1 or less samples only `range.min()`.
///
/// # Examples
///
/// ```rust
/// use statcurve::{sample_level, LevelRange};
///
/// let range = LevelRange::new(1, 100);
/// assert_eq!(sample_level(range, 0, 5), 1);
/// assert_eq!(sample_level(range, 4, 5), 100);
/// assert_eq!(sample_level(range, 0, 1), 1);
/// ```
pub fn sample_level(range: LevelRange, index: usize, count: usize) -> i32 {
    if count <= 1 {
        return range.min();
    }
    let t = (index as f64 / (count - 1) as f64).clamp(0.0, 1.0);
    let min = f64::from(range.min());
    let max = f64::from(range.max());
    let level = (min + (max - min) * t).round_ties_even() as i32;
    range.clamp(level)
}

/// Lazily evaluate `sample_count` evenly spaced samples over `range`.
///
/// Each call returns a fresh, finite iterator. A `sample_count` of 0 or 1
/// yields exactly one sample at `range.min()`.
///
/// # Examples
///
/// ```rust
/// use statcurve::{sample_series, LevelRange, Rank, StatProfile};
///
/// let profile = StatProfile::new(10.0, 1.0);
/// let samples: Vec<_> = sample_series(&profile, LevelRange::new(1, 11), Rank::R, 3).collect();
///
/// let levels: Vec<i32> = samples.iter().map(|s| s.level).collect();
/// assert_eq!(levels, vec![1, 6, 11]);
/// ```
pub fn sample_series(
    profile: &StatProfile,
    range: LevelRange,
    rank: Rank,
    sample_count: usize,
) -> SampleSeries<'_> {
    SampleSeries {
        profile,
        range,
        rank,
        count: sample_count.max(1),
        next: 0,
    }
}

/// Iterator returned by [`sample_series`].
#[derive(Debug, Clone)]
pub struct SampleSeries<'a> {
    profile: &'a StatProfile,
    range: LevelRange,
    rank: Rank,
    count: usize,
    next: usize,
}

impl Iterator for SampleSeries<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.next >= self.count {
            return None;
        }
        let level = sample_level(self.range, self.next, self.count);
        self.next += 1;
        Some(Sample {
            level,
            value: evaluate(self.profile, level, self.range, self.rank),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SampleSeries<'_> {}

impl FusedIterator for SampleSeries<'_> {}
