//! Memoized evaluation module.
//!
//! The growth engine never caches. `GrowthCache` is an explicit, caller-owned
//! memo table keyed by `(profile id, level, rank)` for callers that evaluate
//! the same points repeatedly, such as a stat viewer stepping through
//! levels. Invalidation is always under the caller's control.

use crate::error::GrowthError;
use crate::growth::evaluate;
use crate::level::LevelRange;
use crate::profile::StatProfile;
use crate::rank::Rank;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Arc;

/// Interned string identifier for a registered profile.
///
/// Uses `Arc<str>` so cache keys clone cheaply.
///
/// # Examples
///
/// ```rust
/// use statcurve::ProfileId;
///
/// let id = ProfileId::from_str("A-STR");
/// let same: ProfileId = "A-STR".into();
/// assert_eq!(id, same);
/// assert_eq!(id.as_str(), "A-STR");
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProfileId(Arc<str>);

impl ProfileId {
    pub fn from_str(s: &str) -> Self {
        Self(Arc::from(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProfileId {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for ProfileId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ProfileId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProfileId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ProfileId::from(s))
    }
}

type CacheKey = (ProfileId, i32, Rank);

/// Caller-owned memo table over registered profiles.
///
/// # Examples
///
/// ```rust
/// use statcurve::{GrowthCache, LevelRange, ProfileId, Rank, StatProfile};
///
/// let mut cache = GrowthCache::new();
/// let id = ProfileId::from_str("hero-str");
/// cache.register(id.clone(), StatProfile::new(10.0, 1.0), LevelRange::new(1, 100));
///
/// let value = cache.evaluate(&id, 2, Rank::R).unwrap();
/// assert!((value - 10.5).abs() < 1e-4);
/// assert_eq!(cache.cached(&id, 2, Rank::R), Some(value));
/// ```
#[derive(Debug, Default)]
pub struct GrowthCache {
    profiles: HashMap<ProfileId, (StatProfile, LevelRange)>,
    values: HashMap<CacheKey, f64>,
}

impl GrowthCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the profile stored under `id`.
    ///
    /// Any values cached for `id` are dropped.
    pub fn register(&mut self, id: ProfileId, profile: StatProfile, range: LevelRange) {
        self.invalidate(&id);
        self.profiles.insert(id, (profile, range));
    }

    /// Remove a profile and its cached values.
    ///
    /// Returns the profile and range that were registered, if any.
    pub fn unregister(&mut self, id: &ProfileId) -> Option<(StatProfile, LevelRange)> {
        self.invalidate(id);
        self.profiles.remove(id)
    }

    /// Evaluate a registered profile, reusing a cached value when present.
    ///
    /// Levels below 1 share the cache entry of level 1.
    ///
    /// # Errors
    ///
    /// `GrowthError::UnknownProfile` if nothing is registered under `id`.
    pub fn evaluate(&mut self, id: &ProfileId, level: i32, rank: Rank) -> Result<f64, GrowthError> {
        let key = (id.clone(), level.max(1), rank);
        if let Some(&value) = self.values.get(&key) {
            return Ok(value);
        }

        let (profile, range) = self
            .profiles
            .get(id)
            .ok_or_else(|| GrowthError::UnknownProfile(id.clone()))?;
        let value = evaluate(profile, key.1, *range, rank);
        self.values.insert(key, value);
        Ok(value)
    }

    /// The cached value for a point, without computing it.
    pub fn cached(&self, id: &ProfileId, level: i32, rank: Rank) -> Option<f64> {
        self.values.get(&(id.clone(), level.max(1), rank)).copied()
    }

    /// Drop every cached value for `id`; the profile stays registered.
    pub fn invalidate(&mut self, id: &ProfileId) {
        let before = self.values.len();
        self.values.retain(|(key_id, _, _), _| key_id != id);
        let dropped = before - self.values.len();
        if dropped > 0 {
            log::debug!("invalidated {} cached values for profile {}", dropped, id);
        }
    }

    /// Drop every cached value.
    pub fn invalidate_all(&mut self) {
        self.values.clear();
    }

    pub fn profile(&self, id: &ProfileId) -> Option<&StatProfile> {
        self.profiles.get(id).map(|(profile, _)| profile)
    }

    pub fn contains(&self, id: &ProfileId) -> bool {
        self.profiles.contains_key(id)
    }

    /// Number of cached values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ConstantCurve;
    use crate::rank::RankMultipliers;

    fn profile() -> StatProfile {
        StatProfile::new(10.0, 1.0)
            .with_multipliers(RankMultipliers::default())
            .with_curve(ConstantCurve(0.3), 0.5)
    }

    #[test]
    fn test_profile_id_serde() {
        let id = ProfileId::from_str("B-DEX");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"B-DEX\"");
        let back: ProfileId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_cached_matches_uncached() {
        let mut cache = GrowthCache::new();
        let id = ProfileId::from_str("A");
        let range = LevelRange::new(1, 50);
        cache.register(id.clone(), profile(), range);

        for level in [1, 5, 50, 75] {
            for rank in Rank::ALL {
                let first = cache.evaluate(&id, level, rank).unwrap();
                let second = cache.evaluate(&id, level, rank).unwrap();
                let direct = evaluate(&profile(), level, range, rank);
                assert_eq!(first.to_bits(), direct.to_bits());
                assert_eq!(first.to_bits(), second.to_bits());
            }
        }
        assert_eq!(cache.len(), 16);
    }

    #[test]
    fn test_low_levels_share_entry() {
        let mut cache = GrowthCache::new();
        let id = ProfileId::from_str("A");
        cache.register(id.clone(), profile(), LevelRange::default());

        cache.evaluate(&id, -3, Rank::R).unwrap();
        cache.evaluate(&id, 0, Rank::R).unwrap();
        cache.evaluate(&id, 1, Rank::R).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unknown_profile() {
        let mut cache = GrowthCache::new();
        let id = ProfileId::from_str("missing");
        assert_eq!(
            cache.evaluate(&id, 1, Rank::R),
            Err(GrowthError::UnknownProfile(id.clone()))
        );
    }

    #[test]
    fn test_register_replaces_and_invalidates() {
        let mut cache = GrowthCache::new();
        let id = ProfileId::from_str("A");
        cache.register(id.clone(), StatProfile::new(10.0, 0.0), LevelRange::default());
        assert_eq!(cache.evaluate(&id, 10, Rank::R).unwrap(), 10.0);

        cache.register(id.clone(), StatProfile::new(20.0, 0.0), LevelRange::default());
        assert_eq!(cache.cached(&id, 10, Rank::R), None);
        assert_eq!(cache.evaluate(&id, 10, Rank::R).unwrap(), 20.0);
    }

    #[test]
    fn test_invalidate_is_per_profile() {
        let mut cache = GrowthCache::new();
        let a = ProfileId::from_str("A");
        let b = ProfileId::from_str("B");
        cache.register(a.clone(), profile(), LevelRange::default());
        cache.register(b.clone(), profile(), LevelRange::default());
        cache.evaluate(&a, 10, Rank::R).unwrap();
        cache.evaluate(&b, 10, Rank::R).unwrap();

        cache.invalidate(&a);
        assert_eq!(cache.cached(&a, 10, Rank::R), None);
        assert!(cache.cached(&b, 10, Rank::R).is_some());
        assert!(cache.contains(&a));

        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unregister() {
        let mut cache = GrowthCache::new();
        let id = ProfileId::from_str("A");
        cache.register(id.clone(), profile(), LevelRange::default());
        cache.evaluate(&id, 3, Rank::UR).unwrap();

        let removed = cache.unregister(&id);
        assert!(removed.is_some());
        assert!(!cache.contains(&id));
        assert!(cache.is_empty());
        assert!(cache.evaluate(&id, 3, Rank::UR).is_err());
    }
}
