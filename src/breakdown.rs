//! Evaluation breakdown module.
//!
//! Contains the `GrowthBreakdown` type, a fully traced evaluation that lists
//! every compounding step for balancing and debugging.

use crate::rank::Rank;
use serde::{Deserialize, Serialize};

/// One compounding step of an evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GrowthStep {
    /// The level this step compounds into.
    pub level: i32,
    /// Progress in the level range, clamped into `[0, 1]`.
    pub progress: f64,
    /// `1 + curve(progress) * weight`, or exactly 1 without a curve.
    pub curve_factor: f64,
    /// `growth_rate * curve_factor * 0.05`.
    pub step_growth: f64,
    /// The cumulative bonus after this step.
    pub bonus: f64,
}

/// A traced evaluation result.
///
/// Read-only and serializable. `value` is bit-identical to what
/// [`evaluate`](crate::growth::evaluate) returns for the same arguments.
///
/// # Examples
///
/// ```rust
/// use statcurve::{evaluate_detailed, LevelRange, Rank, StatProfile};
///
/// let profile = StatProfile::new(10.0, 1.0);
/// let breakdown = evaluate_detailed(&profile, 3, LevelRange::new(1, 100), Rank::R);
///
/// assert_eq!(breakdown.steps.len(), 2);
/// assert_eq!(breakdown.steps[0].level, 2);
/// assert!((breakdown.value - 11.025).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrowthBreakdown {
    /// The level actually evaluated, after raising it to at least 1.
    pub level: i32,
    pub rank: Rank,
    pub base: f64,
    /// Product of all step factors; 1.0 when there were no steps.
    pub bonus: f64,
    /// The rank multiplier after flooring.
    pub rank_multiplier: f64,
    /// `base * bonus * rank_multiplier`.
    pub value: f64,
    /// Steps in level order, starting at level 2.
    pub steps: Vec<GrowthStep>,
}

impl GrowthBreakdown {
    /// Start a breakdown with no steps and a bonus of 1.
    pub fn new(level: i32, rank: Rank, base: f64, rank_multiplier: f64) -> Self {
        Self {
            level,
            rank,
            base,
            bonus: 1.0,
            rank_multiplier,
            value: base * 1.0 * rank_multiplier,
            steps: Vec::new(),
        }
    }

    /// Record a step; `bonus` and `value` follow the step's cumulative bonus.
    pub fn add_step(&mut self, step: GrowthStep) {
        self.bonus = step.bonus;
        self.value = self.base * self.bonus * self.rank_multiplier;
        self.steps.push(step);
    }

    /// The step that compounded into `level`, if any.
    pub fn step_at(&self, level: i32) -> Option<&GrowthStep> {
        self.steps.iter().find(|s| s.level == level)
    }
}
