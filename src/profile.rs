//! Stat profiles.
//!
//! A `StatProfile` bundles everything the growth engine needs to know about
//! one stat of one character: base value, growth rate, per-rank multipliers
//! and an optional response curve with its weight.

use crate::curve::ResponseCurve;
use crate::error::GrowthError;
use crate::rank::{Rank, RankMultipliers};
use std::fmt;
use std::sync::Arc;

/// Growth parameters for a single stat.
///
/// Profiles are immutable once built. The builder methods consume and
/// return the profile; the curve is shared through an `Arc`, so cloning a
/// profile is cheap and clones can be evaluated from several threads.
///
/// No input is rejected here. Negative bases or growth rates simply produce
/// the arithmetic they imply; run [`StatProfile::validate`] on untrusted
/// table data if non-finite values must be kept out.
///
/// # Examples
///
/// ```rust
/// use statcurve::{ConstantCurve, Rank, RankMultipliers, StatProfile};
///
/// let profile = StatProfile::new(10.0, 1.0)
///     .with_multipliers(RankMultipliers::default())
///     .with_curve(ConstantCurve(0.5), 1.0);
///
/// assert_eq!(profile.base(), 10.0);
/// assert_eq!(profile.rank_multiplier(Rank::SR), 1.3);
/// assert!(profile.has_curve());
/// ```
#[derive(Clone)]
pub struct StatProfile {
    base: f64,
    growth_rate: f64,
    multipliers: RankMultipliers,
    curve: Option<Arc<dyn ResponseCurve>>,
    curve_weight: f64,
}

impl StatProfile {
    /// Create a profile with no curve and a multiplier of 1.0 for every rank.
    pub fn new(base: f64, growth_rate: f64) -> Self {
        Self {
            base,
            growth_rate,
            multipliers: RankMultipliers::uniform(1.0),
            curve: None,
            curve_weight: 0.0,
        }
    }

    /// Replace the per-rank multipliers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statcurve::{Rank, RankMultipliers, StatProfile};
    ///
    /// let profile = StatProfile::new(10.0, 1.0)
    ///     .with_multipliers(RankMultipliers::default().with(Rank::UR, 3.0));
    /// assert_eq!(profile.rank_multiplier(Rank::UR), 3.0);
    /// ```
    pub fn with_multipliers(mut self, multipliers: RankMultipliers) -> Self {
        self.multipliers = multipliers;
        self
    }

    /// Attach a response curve blended in with `weight`.
    pub fn with_curve(self, curve: impl ResponseCurve + 'static, weight: f64) -> Self {
        self.with_shared_curve(Arc::new(curve), weight)
    }

    /// Attach an already shared response curve.
    pub fn with_shared_curve(mut self, curve: Arc<dyn ResponseCurve>, weight: f64) -> Self {
        self.curve = Some(curve);
        self.curve_weight = weight;
        self
    }

    /// The value at level 1 before the rank multiplier.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Scales every per-level step; 0 disables growth.
    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    pub fn multipliers(&self) -> &RankMultipliers {
        &self.multipliers
    }

    /// The raw multiplier for `rank`, before the engine floors it.
    pub fn rank_multiplier(&self, rank: Rank) -> f64 {
        self.multipliers.get(rank)
    }

    /// The attached response curve, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statcurve::{ConstantCurve, StatProfile};
    ///
    /// let profile = StatProfile::new(10.0, 1.0).with_curve(ConstantCurve(0.25), 1.0);
    /// assert_eq!(profile.curve().map(|c| c.evaluate(0.5)), Some(0.25));
    /// assert!(StatProfile::new(10.0, 1.0).curve().is_none());
    /// ```
    pub fn curve(&self) -> Option<&dyn ResponseCurve> {
        self.curve.as_deref()
    }

    pub fn has_curve(&self) -> bool {
        self.curve.is_some()
    }

    pub fn curve_weight(&self) -> f64 {
        self.curve_weight
    }

    /// Check that every numeric field is finite.
    ///
    /// The engine never calls this; it exists for callers loading profiles
    /// from external data.
    ///
    /// # Errors
    ///
    /// `GrowthError::NonFinite` naming the first offending field.
    pub fn validate(&self) -> Result<(), GrowthError> {
        let fields = [
            ("base", self.base),
            ("growth_rate", self.growth_rate),
            ("curve_weight", self.curve_weight),
            ("multiplier_r", self.multipliers.r),
            ("multiplier_sr", self.multipliers.sr),
            ("multiplier_ssr", self.multipliers.ssr),
            ("multiplier_ur", self.multipliers.ur),
        ];
        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some(&(field, _)) => Err(GrowthError::NonFinite { field }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for StatProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatProfile")
            .field("base", &self.base)
            .field("growth_rate", &self.growth_rate)
            .field("multipliers", &self.multipliers)
            .field("curve", &self.curve.as_ref().map(|c| c.description()))
            .field("curve_weight", &self.curve_weight)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{ConstantCurve, KeyframeCurve};

    #[test]
    fn test_new_profile_defaults() {
        let profile = StatProfile::new(12.0, 0.5);
        assert_eq!(profile.base(), 12.0);
        assert_eq!(profile.growth_rate(), 0.5);
        assert!(!profile.has_curve());
        assert_eq!(profile.curve_weight(), 0.0);
        for rank in Rank::ALL {
            assert_eq!(profile.rank_multiplier(rank), 1.0);
        }
    }

    #[test]
    fn test_clone_shares_curve() {
        let profile = StatProfile::new(10.0, 1.0).with_curve(KeyframeCurve::flat(), 1.0);
        let copy = profile.clone();
        let a = profile.curve.as_ref().unwrap();
        let b = copy.curve.as_ref().unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn test_validate() {
        assert!(StatProfile::new(10.0, 1.0).validate().is_ok());
        assert!(StatProfile::new(-10.0, -1.0).validate().is_ok());

        let bad = StatProfile::new(10.0, f64::NAN);
        assert_eq!(
            bad.validate(),
            Err(GrowthError::NonFinite { field: "growth_rate" })
        );

        let bad = StatProfile::new(10.0, 1.0)
            .with_multipliers(RankMultipliers::default().with(Rank::UR, f64::INFINITY));
        assert_eq!(
            bad.validate(),
            Err(GrowthError::NonFinite { field: "multiplier_ur" })
        );
    }

    #[test]
    fn test_debug_shows_curve_description() {
        let profile = StatProfile::new(1.0, 1.0).with_curve(ConstantCurve(0.25), 0.5);
        let debug = format!("{:?}", profile);
        assert!(debug.contains("constant(0.25)"));
    }
}
