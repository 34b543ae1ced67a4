//! Level ranges and progress normalization.

use serde::{Deserialize, Serialize};

/// Inclusive level bounds used to normalize a level into progress.
///
/// Construction never fails: `min` is raised to 1 and `max` to `min`,
/// the same way the balancing tool corrects its input fields.
///
/// # Examples
///
/// ```rust
/// use statcurve::LevelRange;
///
/// let range = LevelRange::new(1, 101);
/// assert_eq!(range.span(), 100);
/// assert_eq!(range.progress(51), 0.5);
///
/// let fixed = LevelRange::new(0, -5);
/// assert_eq!((fixed.min(), fixed.max()), (1, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawLevelRange", into = "RawLevelRange")]
pub struct LevelRange {
    min: i32,
    max: i32,
}

#[derive(Serialize, Deserialize)]
struct RawLevelRange {
    min: i32,
    max: i32,
}

impl From<RawLevelRange> for LevelRange {
    fn from(raw: RawLevelRange) -> Self {
        LevelRange::new(raw.min, raw.max)
    }
}

impl From<LevelRange> for RawLevelRange {
    fn from(range: LevelRange) -> Self {
        RawLevelRange {
            min: range.min,
            max: range.max,
        }
    }
}

impl LevelRange {
    /// Create a range, raising `min` to 1 and `max` to `min`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statcurve::LevelRange;
    ///
    /// let range = LevelRange::new(10, 5);
    /// assert_eq!(range.min(), 10);
    /// assert_eq!(range.max(), 10);
    /// ```
    pub fn new(min: i32, max: i32) -> Self {
        let min = min.max(1);
        let max = max.max(min);
        Self { min, max }
    }

    /// The lowest level, never below 1.
    pub fn min(&self) -> i32 {
        self.min
    }

    /// The highest level, never below `min`.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// `max - min`, never less than 1 so it can always be divided by.
    pub fn span(&self) -> i32 {
        (self.max - self.min).max(1)
    }

    /// Normalized position of `level` in the range, unclamped.
    pub fn progress(&self, level: i32) -> f64 {
        f64::from(level - self.min) / f64::from(self.span())
    }

    /// Clamp `level` into `[min, max]`.
    pub fn clamp(&self, level: i32) -> i32 {
        level.clamp(self.min, self.max)
    }

    /// Whether `level` lies in `[min, max]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statcurve::LevelRange;
    ///
    /// let range = LevelRange::new(1, 50);
    /// assert!(range.contains(50));
    /// assert!(!range.contains(0));
    /// ```
    pub fn contains(&self, level: i32) -> bool {
        (self.min..=self.max).contains(&level)
    }
}

impl Default for LevelRange {
    fn default() -> Self {
        Self::new(1, 100)
    }
}
