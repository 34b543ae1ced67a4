//! # statcurve - Deterministic Stat Growth Engine
//!
//! A stat growth engine for character balancing that provides:
//! - **Deterministic** evaluation (same input → bit-identical output)
//! - **Curve-modulated** growth (a response curve shapes each level's gain)
//! - **Rank-aware** results (R / SR / SSR / UR multipliers)
//! - **Preview-friendly** sampling of whole growth series
//!
//! ## Core Concepts
//!
//! ### Growth Pipeline
//!
//! ```text
//! [StatProfile] + [LevelRange] + level + rank → evaluate → f64
//! ```
//!
//! 1. **Profiles** hold base value, growth rate, rank multipliers and curve
//! 2. **Level ranges** normalize a level into progress in `[0, 1]`
//! 3. **Evaluation** compounds `1 + growth * curve_factor * 0.05` for every
//!    level from 2 up to the target, then applies base and rank multiplier
//!
//! ### Key Features
//!
//! - **Response Curves**: keyframe tables, constants or injected functions
//! - **Breakdowns**: every compounding step of an evaluation, for debugging
//! - **Explicit Caching**: `GrowthCache` memoizes under caller control
//! - **Presets**: multi-character comparisons with CSV export
//! - **Data Tables**: JSON tables loaded by file name
//!
//! ## Example
//!
//! ```rust
//! use statcurve::*;
//!
//! let profile = StatProfile::new(10.0, 1.0)
//!     .with_multipliers(RankMultipliers::default())
//!     .with_curve(KeyframeCurve::linear(0.0, 0.0, 1.0, 1.0).unwrap(), 0.5);
//! let range = LevelRange::new(1, 100);
//!
//! // Level 1 has no growth applied
//! assert!((evaluate(&profile, 1, range, Rank::SR) - 13.0).abs() < 1e-9);
//!
//! // Sample the whole range for a preview
//! let series: Vec<Sample> = sample_series(&profile, range, Rank::SR, 50).collect();
//! assert_eq!(series.len(), 50);
//! assert_eq!(series[49].level, 100);
//! ```
//!
//! ## Modules
//!
//! - [`growth`] - The evaluation engine and series sampler
//! - [`profile`] - Stat profiles
//! - [`curve`] - Response curves
//! - [`rank`] - Ranks and rank multipliers
//! - [`level`] - Level ranges
//! - [`breakdown`] - Traced evaluations
//! - [`cache`] - Memoized evaluation
//! - [`preset`] - Balancing preview presets
//! - [`player`] - Player stat rows and gameplay stats
//! - [`table`] - JSON data table loading
//! - [`error`] - Error types

pub mod breakdown;
pub mod cache;
pub mod curve;
pub mod error;
pub mod growth;
pub mod level;
pub mod player;
pub mod preset;
pub mod profile;
pub mod rank;
pub mod table;

// Re-export main types for convenience
pub use breakdown::{GrowthBreakdown, GrowthStep};
pub use cache::{GrowthCache, ProfileId};
pub use error::GrowthError;
pub use growth::{
    evaluate, evaluate_detailed, floor_rank_multiplier, sample_level, sample_series, Sample,
    SampleSeries, GROWTH_STEP_SCALE, MIN_RANK_MULTIPLIER,
};
pub use level::LevelRange;
pub use profile::StatProfile;
pub use rank::{Rank, RankMultipliers};

// Re-export curves
pub use curve::{ConstantCurve, FnCurve, Keyframe, KeyframeCurve, ResponseCurve};
