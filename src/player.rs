//! Player stat table rows and in-game stat resolution.
//!
//! Gameplay uses a simpler closed-form growth than the balancing engine:
//! each primary stat compounds at `growth_rate * 2%` per level and the
//! derived damage and speed values are computed from the grown stats.

use crate::preset::StatKind;
use crate::profile::StatProfile;
use crate::rank::{Rank, RankMultipliers};
use crate::table::DataFile;
use serde::{Deserialize, Serialize};

/// Damage before any stat contribution.
pub const BASE_DAMAGE: f64 = 10.0;

/// Attack interval at level 1.
pub const BASE_SPEED: f64 = 2.0;

/// Scales a row's growth rate into a per-level stat growth.
pub const STAT_GROWTH_SCALE: f64 = 0.02;

/// Per-level growth of the STR contribution to damage.
pub const DAMAGE_GROWTH_RATE: f64 = 0.02;

/// A row of the `PlayerStatTable` data file.
///
/// Column names follow the exported sheet (`Id`, `UnitRank`, `Str`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerStatRow {
    pub id: String,
    #[serde(default)]
    pub visible_type: Option<String>,
    pub unit_rank: Rank,
    pub str: i32,
    pub dex: i32,
    pub luk: i32,
    pub str_growth_rate: f64,
    pub dex_growth_rate: f64,
    pub luk_growth_rate: f64,
}

impl DataFile for PlayerStatRow {
    const BASE_NAME: &'static str = "PlayerStatTable";
}

impl PlayerStatRow {
    pub fn base(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Str => self.str,
            StatKind::Dex => self.dex,
            StatKind::Luk => self.luk,
        }
    }

    pub fn growth_rate(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::Str => self.str_growth_rate,
            StatKind::Dex => self.dex_growth_rate,
            StatKind::Luk => self.luk_growth_rate,
        }
    }

    /// A balancing profile seeded from this row, for previewing it
    /// alongside hand-tuned characters.
    pub fn profile(&self, kind: StatKind, multipliers: RankMultipliers) -> StatProfile {
        StatProfile::new(f64::from(self.base(kind)), self.growth_rate(kind))
            .with_multipliers(multipliers)
    }
}

/// Grow one row stat to `level`, truncating the gain toward zero.
///
/// The result saturates at the `i32` bounds.
fn grow_stat(base: i32, growth_rate: f64, level: i32) -> i32 {
    let base_f = f64::from(base);
    let grown = base_f * (1.0 + growth_rate * STAT_GROWTH_SCALE).powi(level);
    (base_f + (grown - base_f).trunc()) as i32
}

/// Resolved gameplay stats at a level.
///
/// # Examples
///
/// ```rust
/// use statcurve::player::{PlayerStatRow, PlayerStats};
/// use statcurve::Rank;
///
/// let row = PlayerStatRow {
///     id: "hero".into(),
///     visible_type: None,
///     unit_rank: Rank::R,
///     str: 10,
///     dex: 10,
///     luk: 10,
///     str_growth_rate: 1.0,
///     dex_growth_rate: 1.0,
///     luk_growth_rate: 1.0,
/// };
///
/// let stats = PlayerStats::at_level(1, &row);
/// assert_eq!(stats.str, 10);
/// assert_eq!(stats.damage, 10.0);
/// assert_eq!(stats.speed, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub str: i32,
    pub dex: i32,
    pub luk: i32,
    pub damage: f64,
    pub speed: f64,
}

impl PlayerStats {
    /// Resolve a row at `level`.
    ///
    /// Level 1 and below take the row stats as they are, with base damage
    /// and speed. Above level 1:
    ///
    /// - `stat = base + trunc(base * (1 + rate * 0.02)^level - base)`
    /// - `damage = 10 + str * 1.02^(level - 1)`
    /// - `speed = max(0, 2 - 0.01 * level - 0.005 * dex)`
    pub fn at_level(level: i32, row: &PlayerStatRow) -> Self {
        if level <= 1 {
            return Self {
                str: row.str,
                dex: row.dex,
                luk: row.luk,
                damage: BASE_DAMAGE,
                speed: BASE_SPEED,
            };
        }

        let str = grow_stat(row.str, row.str_growth_rate, level);
        let dex = grow_stat(row.dex, row.dex_growth_rate, level);
        let luk = grow_stat(row.luk, row.luk_growth_rate, level);
        let damage = BASE_DAMAGE + f64::from(str) * (1.0 + DAMAGE_GROWTH_RATE).powi(level - 1);
        let speed = BASE_SPEED - f64::from(level) * 0.01 - f64::from(dex) * 0.005;

        Self {
            str,
            dex,
            luk,
            damage,
            speed: speed.max(0.0),
        }
    }
}

/// Damage from STR alone, growing 5% per level past level 1.
pub fn player_damage(level: i32, str: i32) -> f64 {
    BASE_DAMAGE + f64::from(str) * 1.05_f64.powi(level.saturating_sub(1))
}

/// A row paired with a current level, as shown by the stat viewer.
///
/// # Examples
///
/// ```rust
/// use statcurve::player::{PlayerProgress, PlayerStatRow};
/// use statcurve::Rank;
///
/// let row: PlayerStatRow = serde_json::from_str(r#"{
///     "Id": "hero", "UnitRank": "SR",
///     "Str": 10, "Dex": 8, "Luk": 5,
///     "StrGrowthRate": 1.0, "DexGrowthRate": 1.0, "LukGrowthRate": 1.0
/// }"#).unwrap();
///
/// let mut progress = PlayerProgress::new(row);
/// progress.level_up();
/// assert_eq!(progress.level(), 2);
/// progress.reset();
/// assert_eq!(progress.level(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProgress {
    row: PlayerStatRow,
    level: i32,
}

impl PlayerProgress {
    /// Start at level 1.
    pub fn new(row: PlayerStatRow) -> Self {
        Self { row, level: 1 }
    }

    pub fn row(&self) -> &PlayerStatRow {
        &self.row
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// Advance one level and return the new stats.
    ///
    /// The level stops at `i32::MAX`.
    pub fn level_up(&mut self) -> PlayerStats {
        self.level = self.level.saturating_add(1);
        self.stats()
    }

    /// Return to level 1 and return the stats there.
    pub fn reset(&mut self) -> PlayerStats {
        self.level = 1;
        self.stats()
    }

    pub fn stats(&self) -> PlayerStats {
        PlayerStats::at_level(self.level, &self.row)
    }
}
