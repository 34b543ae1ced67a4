//! Balancing preview presets.
//!
//! A `CurvePreset` compares several characters side by side: for every
//! visible (character, stat, rank) combination it samples a growth series
//! over the preset's level range. Presets persist as JSON and series can be
//! exported as CSV for spreadsheets.

use crate::curve::KeyframeCurve;
use crate::error::GrowthError;
use crate::growth::{sample_level, sample_series, Sample};
use crate::level::LevelRange;
use crate::profile::StatProfile;
use crate::rank::{Rank, RankMultipliers};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

/// Fewest samples a preset will take.
pub const MIN_SAMPLES: usize = 2;

/// Most samples a preset will take.
pub const MAX_SAMPLES: usize = 2000;

/// Headroom applied above the tallest series by [`auto_y_max`].
pub const Y_HEADROOM: f64 = 1.08;

/// The three primary stats a character profile covers.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatKind {
    #[serde(rename = "STR")]
    Str,
    #[serde(rename = "DEX")]
    Dex,
    #[serde(rename = "LUK")]
    Luk,
}

impl StatKind {
    pub const ALL: [StatKind; 3] = [StatKind::Str, StatKind::Dex, StatKind::Luk];

    pub fn as_str(self) -> &'static str {
        match self {
            StatKind::Str => "STR",
            StatKind::Dex => "DEX",
            StatKind::Luk => "LUK",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STR" => Ok(StatKind::Str),
            "DEX" => Ok(StatKind::Dex),
            "LUK" => Ok(StatKind::Luk),
            _ => Err(GrowthError::UnknownStat(s.to_string())),
        }
    }
}

/// Growth settings for one stat of one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatCurveConfig {
    pub base: f64,
    pub growth: f64,
    pub curve: KeyframeCurve,
}

impl Default for StatCurveConfig {
    fn default() -> Self {
        Self {
            base: 10.0,
            growth: 1.0,
            curve: KeyframeCurve::flat(),
        }
    }
}

/// One character in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Shown in series names and legends.
    pub label: String,
    #[serde(rename = "str")]
    pub strength: StatCurveConfig,
    #[serde(rename = "dex")]
    pub dexterity: StatCurveConfig,
    #[serde(rename = "luk")]
    pub luck: StatCurveConfig,
    pub multipliers: RankMultipliers,
    /// Curve influence shared by all three stats; 0 ignores the curves.
    pub curve_weight: f64,
}

impl CharacterConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn stat(&self, kind: StatKind) -> &StatCurveConfig {
        match kind {
            StatKind::Str => &self.strength,
            StatKind::Dex => &self.dexterity,
            StatKind::Luk => &self.luck,
        }
    }

    pub fn stat_mut(&mut self, kind: StatKind) -> &mut StatCurveConfig {
        match kind {
            StatKind::Str => &mut self.strength,
            StatKind::Dex => &mut self.dexterity,
            StatKind::Luk => &mut self.luck,
        }
    }

    /// Build the engine profile for one stat.
    pub fn profile(&self, kind: StatKind) -> StatProfile {
        let stat = self.stat(kind);
        StatProfile::new(stat.base, stat.growth)
            .with_multipliers(self.multipliers)
            .with_curve(stat.curve.clone(), self.curve_weight)
    }
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            label: String::from("Character A"),
            strength: StatCurveConfig::default(),
            dexterity: StatCurveConfig::default(),
            luck: StatCurveConfig::default(),
            multipliers: RankMultipliers::default(),
            curve_weight: 1.0,
        }
    }
}

/// A named, sampled growth series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// `"{label}-{STAT}-{RANK}"`.
    pub name: String,
    pub character: String,
    pub stat: StatKind,
    pub rank: Rank,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn max_value(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.value).reduce(f64::max)
    }
}

/// A saved comparison setup.
///
/// # Examples
///
/// ```rust
/// use statcurve::preset::{CurvePreset, StatKind};
/// use statcurve::Rank;
///
/// let mut preset = CurvePreset::default();
/// preset.visible_ranks = [Rank::R].into_iter().collect();
///
/// let series = preset.build_series();
/// assert_eq!(series.len(), 2); // characters A and B, STR only
/// assert_eq!(series[0].name, "A-STR-R");
/// assert_eq!(series[0].samples.len(), 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurvePreset {
    pub min_level: i32,
    pub max_level: i32,
    pub samples: usize,
    pub visible_stats: BTreeSet<StatKind>,
    pub visible_ranks: BTreeSet<Rank>,
    pub characters: Vec<CharacterConfig>,
}

impl Default for CurvePreset {
    fn default() -> Self {
        Self {
            min_level: 1,
            max_level: 100,
            samples: 200,
            visible_stats: [StatKind::Str].into_iter().collect(),
            visible_ranks: [Rank::R, Rank::SR, Rank::SSR].into_iter().collect(),
            characters: vec![CharacterConfig::new("A"), CharacterConfig::new("B")],
        }
    }
}

impl CurvePreset {
    /// The preset's level bounds, corrected to `min >= 1` and `max >= min`.
    pub fn level_range(&self) -> LevelRange {
        LevelRange::new(self.min_level, self.max_level)
    }

    /// The sample count clamped into `[MIN_SAMPLES, MAX_SAMPLES]`.
    pub fn sample_count(&self) -> usize {
        self.samples.clamp(MIN_SAMPLES, MAX_SAMPLES)
    }

    /// A copy with level bounds and sample count corrected.
    pub fn normalized(&self) -> Self {
        let range = self.level_range();
        Self {
            min_level: range.min(),
            max_level: range.max(),
            samples: self.sample_count(),
            ..self.clone()
        }
    }

    /// Append a default character labelled `Char N`.
    pub fn add_character(&mut self) -> &mut CharacterConfig {
        let label = format!("Char {}", self.characters.len() + 1);
        self.characters.push(CharacterConfig::new(label));
        let last = self.characters.len() - 1;
        &mut self.characters[last]
    }

    /// Insert a copy of character `index` right after it.
    ///
    /// Returns the index of the copy, or `None` if `index` is out of range.
    pub fn duplicate_character(&mut self, index: usize) -> Option<usize> {
        let mut copy = self.characters.get(index)?.clone();
        copy.label.push_str(" Copy");
        self.characters.insert(index + 1, copy);
        Some(index + 1)
    }

    pub fn remove_character(&mut self, index: usize) -> Option<CharacterConfig> {
        (index < self.characters.len()).then(|| self.characters.remove(index))
    }

    /// Sample every visible (character, stat, rank) combination.
    ///
    /// Series are ordered by character, then STR/DEX/LUK, then R/SR/SSR/UR.
    pub fn build_series(&self) -> Vec<Series> {
        let range = self.level_range();
        let count = self.sample_count();
        let mut list = Vec::new();

        for character in &self.characters {
            for &stat in &self.visible_stats {
                let profile = character.profile(stat);
                for &rank in &self.visible_ranks {
                    list.push(Series {
                        name: format!("{}-{}-{}", character.label, stat, rank),
                        character: character.label.clone(),
                        stat,
                        rank,
                        samples: sample_series(&profile, range, rank, count).collect(),
                    });
                }
            }
        }
        list
    }

    /// Write `series` as CSV: a `Level` column then one column per series.
    ///
    /// Values carry at most four decimals; a series shorter than the
    /// preset's sample count leaves its remaining cells empty.
    pub fn write_csv<W: Write>(&self, mut out: W, series: &[Series]) -> io::Result<()> {
        let range = self.level_range();
        let count = self.sample_count();

        write!(out, "Level")?;
        for s in series {
            write!(out, ",{}", s.name)?;
        }
        writeln!(out)?;

        for i in 0..count {
            write!(out, "{}", sample_level(range, i, count))?;
            for s in series {
                match s.samples.get(i) {
                    Some(sample) => write!(out, ",{}", format_value(sample.value))?,
                    None => write!(out, ",")?,
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Write `series` as a CSV file at `path`.
    pub fn export_csv(&self, path: &Path, series: &[Series]) -> Result<(), GrowthError> {
        let file = std::fs::File::create(path).map_err(|e| GrowthError::io(path, e))?;
        let mut out = io::BufWriter::new(file);
        self.write_csv(&mut out, series)
            .and_then(|_| out.flush())
            .map_err(|e| GrowthError::io(path, e))?;
        log::info!("CSV saved: {}", path.display());
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self, GrowthError> {
        serde_json::from_str(text).map_err(|e| GrowthError::parse("preset", e))
    }

    pub fn to_json(&self) -> Result<String, GrowthError> {
        serde_json::to_string_pretty(self).map_err(|e| GrowthError::parse("preset", e))
    }

    /// Load a preset from a JSON file.
    pub fn load(path: &Path) -> Result<Self, GrowthError> {
        let text = std::fs::read_to_string(path).map_err(|e| GrowthError::io(path, e))?;
        let preset = serde_json::from_str(&text)
            .map_err(|e| GrowthError::parse(path.display().to_string(), e))?;
        log::info!("preset loaded: {}", path.display());
        Ok(preset)
    }

    /// Save the preset as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), GrowthError> {
        let text = self.to_json()?;
        std::fs::write(path, text).map_err(|e| GrowthError::io(path, e))?;
        log::info!("preset saved: {}", path.display());
        Ok(())
    }
}

/// A Y-axis ceiling for plotting: 8% above the tallest value, at least 1.
pub fn auto_y_max(series: &[Series]) -> f64 {
    let max = series
        .iter()
        .filter_map(Series::max_value)
        .fold(0.0, f64::max);
    (max * Y_HEADROOM).max(1.0)
}

/// Format with at most four decimals and no trailing zeros.
fn format_value(value: f64) -> String {
    let text = format!("{:.4}", value);
    if !text.contains('.') {
        return text;
    }
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        String::from("0")
    } else {
        trimmed.to_string()
    }
}
