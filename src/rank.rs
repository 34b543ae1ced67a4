//! Rank tiers and their stat multipliers.
//!
//! Every character belongs to one of four quality tiers. A profile carries
//! one multiplier per tier and evaluation picks the one for the requested
//! rank.

use crate::error::GrowthError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A discrete quality tier.
///
/// Ranks order from lowest to highest: `R < SR < SSR < UR`.
///
/// # Examples
///
/// ```rust
/// use statcurve::Rank;
///
/// let rank: Rank = "ssr".parse().unwrap();
/// assert_eq!(rank, Rank::SSR);
/// assert_eq!(rank.to_string(), "SSR");
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    R,
    SR,
    SSR,
    UR,
}

impl Rank {
    /// All ranks, lowest first.
    pub const ALL: [Rank; 4] = [Rank::R, Rank::SR, Rank::SSR, Rank::UR];

    /// The canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Rank::R => "R",
            Rank::SR => "SR",
            Rank::SSR => "SSR",
            Rank::UR => "UR",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "R" => Ok(Rank::R),
            "SR" => Ok(Rank::SR),
            "SSR" => Ok(Rank::SSR),
            "UR" => Ok(Rank::UR),
            _ => Err(GrowthError::UnknownRank(s.to_string())),
        }
    }
}

impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Per-rank stat multipliers.
///
/// Defaults match the balancing presets: R ×1.0, SR ×1.3, SSR ×1.6, UR ×2.0.
///
/// # Examples
///
/// ```rust
/// use statcurve::{Rank, RankMultipliers};
///
/// let multipliers = RankMultipliers::default();
/// assert_eq!(multipliers.get(Rank::SR), 1.3);
///
/// let flat = RankMultipliers::uniform(1.0);
/// assert_eq!(flat.get(Rank::UR), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankMultipliers {
    pub r: f64,
    pub sr: f64,
    pub ssr: f64,
    pub ur: f64,
}

impl RankMultipliers {
    pub fn new(r: f64, sr: f64, ssr: f64, ur: f64) -> Self {
        Self { r, sr, ssr, ur }
    }

    /// The same multiplier for every rank.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// The raw multiplier for `rank`, before any flooring.
    pub fn get(&self, rank: Rank) -> f64 {
        match rank {
            Rank::R => self.r,
            Rank::SR => self.sr,
            Rank::SSR => self.ssr,
            Rank::UR => self.ur,
        }
    }

    /// Return a copy with the multiplier for `rank` replaced.
    pub fn with(mut self, rank: Rank, value: f64) -> Self {
        match rank {
            Rank::R => self.r = value,
            Rank::SR => self.sr = value,
            Rank::SSR => self.ssr = value,
            Rank::UR => self.ur = value,
        }
        self
    }
}

impl Default for RankMultipliers {
    fn default() -> Self {
        Self::new(1.0, 1.3, 1.6, 2.0)
    }
}
