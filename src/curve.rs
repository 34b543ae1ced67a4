//! Response curves module.
//!
//! A response curve maps normalized level progress in `[0, 1]` to a signed
//! factor, nominally in `[-1, 1]`, that modulates per-level growth. Curves
//! are stateless and deterministic - the same progress always produces the
//! same factor.

use crate::error::GrowthError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trait for progress → factor functions.
///
/// # Examples
///
/// ```rust
/// use statcurve::{ResponseCurve, ConstantCurve};
///
/// let curve = ConstantCurve(0.5);
/// assert_eq!(curve.evaluate(0.25), 0.5);
/// ```
pub trait ResponseCurve: Send + Sync {
    /// Get the curve factor at `progress`.
    ///
    /// The engine always passes progress clamped into `[0, 1]`.
    fn evaluate(&self, progress: f64) -> f64;

    /// Get a human-readable description of this curve.
    fn description(&self) -> String {
        String::from("curve")
    }
}

/// A curve that returns the same factor everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantCurve(pub f64);

impl ResponseCurve for ConstantCurve {
    fn evaluate(&self, _progress: f64) -> f64 {
        self.0
    }

    fn description(&self) -> String {
        format!("constant({:.2})", self.0)
    }
}

/// A single control point of a `KeyframeCurve`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f64,
    pub value: f64,
}

impl Keyframe {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// A piecewise-linear curve over a sorted keyframe table.
///
/// Progress before the first key or after the last key takes that key's
/// value. An empty table evaluates to 0 everywhere.
///
/// Serializes as a plain array of `{ "time", "value" }` objects.
///
/// # Examples
///
/// ```rust
/// use statcurve::{Keyframe, KeyframeCurve, ResponseCurve};
///
/// let curve = KeyframeCurve::new(vec![
///     Keyframe::new(0.0, -1.0),
///     Keyframe::new(1.0, 1.0),
/// ]).unwrap();
///
/// assert_eq!(curve.evaluate(0.5), 0.0);
/// assert_eq!(curve.evaluate(2.0), 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct KeyframeCurve {
    keys: Vec<Keyframe>,
}

impl KeyframeCurve {
    /// Build a curve from keyframes in any order.
    ///
    /// Keys are sorted by time; keys sharing a time keep their given order.
    ///
    /// # Errors
    ///
    /// `GrowthError::InvalidKeyframe` if any key time is NaN or infinite.
    pub fn new(mut keys: Vec<Keyframe>) -> Result<Self, GrowthError> {
        if let Some(bad) = keys.iter().find(|k| !k.time.is_finite()) {
            return Err(GrowthError::InvalidKeyframe(bad.time));
        }
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { keys })
    }

    /// A straight line through two points.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statcurve::{KeyframeCurve, ResponseCurve};
    ///
    /// let ramp = KeyframeCurve::linear(0.0, 0.0, 1.0, 0.5).unwrap();
    /// assert_eq!(ramp.evaluate(0.5), 0.25);
    /// ```
    pub fn linear(t0: f64, v0: f64, t1: f64, v1: f64) -> Result<Self, GrowthError> {
        Self::new(vec![Keyframe::new(t0, v0), Keyframe::new(t1, v1)])
    }

    /// A zero curve over `[0, 1]`; has no effect on growth.
    pub fn flat() -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 0.0)],
        }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl TryFrom<Vec<Keyframe>> for KeyframeCurve {
    type Error = GrowthError;

    fn try_from(keys: Vec<Keyframe>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<KeyframeCurve> for Vec<Keyframe> {
    fn from(curve: KeyframeCurve) -> Self {
        curve.keys
    }
}

impl ResponseCurve for KeyframeCurve {
    fn evaluate(&self, progress: f64) -> f64 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if progress <= first.time {
            return first.value;
        }
        if progress >= last.time {
            return last.value;
        }

        // First key strictly after `progress`; bounded to 1..len by the checks above.
        let hi = self.keys.partition_point(|k| k.time <= progress);
        let a = self.keys[hi - 1];
        let b = self.keys[hi];
        let u = (progress - a.time) / (b.time - a.time);
        a.value + (b.value - a.value) * u
    }

    fn description(&self) -> String {
        format!("keyframes({})", self.keys.len())
    }
}

/// A curve backed by an injected function.
///
/// # Examples
///
/// ```rust
/// use statcurve::{FnCurve, ResponseCurve};
///
/// let ease_in = FnCurve::new(|t| t * t, "ease-in");
/// assert_eq!(ease_in.evaluate(0.5), 0.25);
/// assert_eq!(ease_in.description(), "ease-in");
/// ```
pub struct FnCurve {
    function: Box<dyn Fn(f64) -> f64 + Send + Sync>,
    description: String,
}

impl FnCurve {
    pub fn new<F>(function: F, description: impl Into<String>) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            function: Box::new(function),
            description: description.into(),
        }
    }
}

impl fmt::Debug for FnCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCurve")
            .field("description", &self.description)
            .finish()
    }
}

impl ResponseCurve for FnCurve {
    fn evaluate(&self, progress: f64) -> f64 {
        (self.function)(progress)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}
