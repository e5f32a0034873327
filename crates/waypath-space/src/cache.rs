//! Bounded LRU cache for nearest-neighbour answers.
//!
//! [`NearestCache`] maps a `(quantized point, k)` key to the obstacle
//! indices answering that query. Recency is tracked by the insertion
//! order of an [`IndexMap`]: a hit moves the entry to the back, and when
//! the cache is full the front (least recently used) entry is evicted.
//!
//! The cache is bound to one obstacle set by its
//! [`FieldInstanceId`]. Binding to a different id drops every entry,
//! since indices into the old set are meaningless for the new one.

use indexmap::IndexMap;
use smallvec::SmallVec;
use waypath_core::{FieldInstanceId, Point};

use crate::error::SpaceError;

/// Obstacle indices (into the bound field) in ascending distance order.
pub type NeighbourIndices = SmallVec<[usize; 16]>;

// ── CacheConfig ─────────────────────────────────────────────────

/// Sizing and key-quantization parameters for a [`NearestCache`].
#[derive(Clone, Debug, PartialEq)]
pub struct CacheConfig {
    /// Maximum number of memoized `(point, k)` answers. Default: 4096.
    ///
    /// One simulation touches at most `max_steps + 2` distinct waypoints
    /// and the scorer revisits the same ones, so a few thousand entries
    /// cover a worker's hot set for a generation.
    pub capacity: usize,
    /// Grid step used to quantize query coordinates. Default: `1e-6`.
    pub resolution: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 4096,
            resolution: 1e-6,
        }
    }
}

impl CacheConfig {
    /// Check that the cache can hold entries and the quantum is usable.
    pub fn validate(&self) -> Result<(), SpaceError> {
        if self.capacity == 0 {
            return Err(SpaceError::ZeroCapacity);
        }
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(SpaceError::InvalidResolution {
                value: self.resolution,
            });
        }
        Ok(())
    }
}

// ── Keys ────────────────────────────────────────────────────────

/// A point snapped to an integer grid of step `resolution`.
///
/// Raw `f64` coordinates make poor hash keys: two waypoints computed by
/// slightly different arithmetic would miss each other. Snapping gives
/// a stable key, and the index evaluates the query at the snapped point
/// so the cached answer is a pure function of the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuantizedPoint {
    x: i64,
    y: i64,
}

impl QuantizedPoint {
    /// Snap `p` to the nearest multiple of `resolution` on each axis.
    pub fn quantize(p: Point, resolution: f64) -> Result<Self, SpaceError> {
        if !p.is_finite() {
            return Err(SpaceError::NonFinitePoint { point: p });
        }
        let snap = |v: f64| {
            let q = (v / resolution).round();
            // i64::MAX as f64 rounds up to 2^63, so compare strictly.
            if q.is_finite() && q.abs() < i64::MAX as f64 {
                Some(q as i64)
            } else {
                None
            }
        };
        match (snap(p.x), snap(p.y)) {
            (Some(x), Some(y)) => Ok(Self { x, y }),
            _ => Err(SpaceError::QuantizationOverflow { point: p }),
        }
    }

    /// The grid point this key stands for.
    pub fn to_point(self, resolution: f64) -> Point {
        Point::new(self.x as f64 * resolution, self.y as f64 * resolution)
    }
}

/// Cache key: a quantized query point and the neighbour count asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Snapped query point.
    pub point: QuantizedPoint,
    /// Requested neighbour count.
    pub k: usize,
}

// ── Stats ───────────────────────────────────────────────────────

/// Counters describing cache effectiveness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to be computed.
    pub misses: u64,
    /// Entries dropped to respect the capacity bound.
    pub evictions: u64,
    /// Times the cache was emptied by a field change or explicit clear.
    pub invalidations: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, or 0 with no lookups.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Accumulate another set of counters into this one.
    pub fn merge(&mut self, other: &CacheStats) {
        self.hits += other.hits;
        self.misses += other.misses;
        self.evictions += other.evictions;
        self.invalidations += other.invalidations;
    }
}

// ── NearestCache ────────────────────────────────────────────────

/// Fixed-capacity LRU map from [`CacheKey`] to neighbour indices.
#[derive(Debug)]
pub struct NearestCache {
    entries: IndexMap<CacheKey, NeighbourIndices>,
    capacity: usize,
    bound_to: Option<FieldInstanceId>,
    stats: CacheStats,
}

impl NearestCache {
    /// Create an empty cache holding at most `capacity` entries.
    ///
    /// A zero capacity is raised to one; [`CacheConfig::validate`]
    /// rejects it before it gets here.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: IndexMap::with_capacity(capacity.min(1024)),
            capacity,
            bound_to: None,
            stats: CacheStats::default(),
        }
    }

    /// Bind the cache to an obstacle set.
    ///
    /// Returns `true` if the cache had been bound to a different set and
    /// was cleared.
    pub fn bind(&mut self, field: FieldInstanceId) -> bool {
        match self.bound_to {
            Some(current) if current == field => false,
            Some(_) => {
                self.clear();
                self.bound_to = Some(field);
                true
            }
            None => {
                self.bound_to = Some(field);
                false
            }
        }
    }

    /// The obstacle set the entries refer to, if any.
    pub fn bound_to(&self) -> Option<FieldInstanceId> {
        self.bound_to
    }

    /// Look up `key`, marking it most recently used on a hit.
    pub fn get(&mut self, key: &CacheKey) -> Option<&NeighbourIndices> {
        match self.entries.get_index_of(key) {
            Some(i) => {
                self.stats.hits += 1;
                let last = self.entries.len() - 1;
                self.entries.move_index(i, last);
                self.entries.get_index(last).map(|(_, v)| v)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Store an answer, evicting the least recently used entry if full.
    pub fn insert(&mut self, key: CacheKey, value: NeighbourIndices) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
            self.stats.evictions += 1;
        }
        self.entries.insert(key, value);
    }

    /// Drop every entry. The binding is kept.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
        }
        self.stats.invalidations += 1;
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Counters since construction.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Whether `key` is currently cached, without touching recency.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn key(x: f64, k: usize) -> CacheKey {
        CacheKey {
            point: QuantizedPoint::quantize(Point::new(x, 0.0), 1e-6).unwrap(),
            k,
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(CacheConfig::default().validate().is_ok());
    }

    #[test]
    fn config_rejects_zero_capacity_and_bad_resolution() {
        let zero = CacheConfig {
            capacity: 0,
            ..CacheConfig::default()
        };
        assert_eq!(zero.validate(), Err(SpaceError::ZeroCapacity));

        let bad = CacheConfig {
            resolution: 0.0,
            ..CacheConfig::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(SpaceError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn quantization_absorbs_float_noise() {
        let a = QuantizedPoint::quantize(Point::new(0.1 + 0.2, 5.0), 1e-6).unwrap();
        let b = QuantizedPoint::quantize(Point::new(0.3, 5.0), 1e-6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn quantization_rejects_nan_and_huge_values() {
        assert!(matches!(
            QuantizedPoint::quantize(Point::new(f64::NAN, 0.0), 1e-6),
            Err(SpaceError::NonFinitePoint { .. })
        ));
        assert!(matches!(
            QuantizedPoint::quantize(Point::new(1e300, 0.0), 1e-6),
            Err(SpaceError::QuantizationOverflow { .. })
        ));
    }

    #[test]
    fn k_is_part_of_the_key() {
        let mut cache = NearestCache::new(4);
        cache.insert(key(1.0, 5), smallvec![0, 1]);
        assert!(cache.get(&key(1.0, 10)).is_none());
        assert_eq!(cache.get(&key(1.0, 5)).map(|v| v.len()), Some(2));
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = NearestCache::new(2);
        cache.insert(key(1.0, 1), smallvec![1]);
        cache.insert(key(2.0, 1), smallvec![2]);
        // Touch 1.0 so 2.0 becomes the eviction victim.
        assert!(cache.get(&key(1.0, 1)).is_some());
        cache.insert(key(3.0, 1), smallvec![3]);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&key(1.0, 1)));
        assert!(!cache.contains(&key(2.0, 1)));
        assert!(cache.contains(&key(3.0, 1)));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn reinserting_existing_key_does_not_evict() {
        let mut cache = NearestCache::new(1);
        cache.insert(key(1.0, 1), smallvec![1]);
        cache.insert(key(1.0, 1), smallvec![4]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn rebinding_to_another_field_clears() {
        let a = FieldInstanceId::next();
        let b = FieldInstanceId::next();
        let mut cache = NearestCache::new(8);
        assert!(!cache.bind(a));
        cache.insert(key(1.0, 1), smallvec![0]);
        assert!(!cache.bind(a));
        assert_eq!(cache.len(), 1);
        assert!(cache.bind(b));
        assert!(cache.is_empty());
        assert_eq!(cache.bound_to(), Some(b));
    }

    #[test]
    fn hit_rate_counts_lookups() {
        let mut cache = NearestCache::new(4);
        assert_eq!(cache.stats().hit_rate(), 0.0);
        cache.insert(key(1.0, 1), smallvec![0]);
        let _ = cache.get(&key(1.0, 1));
        let _ = cache.get(&key(2.0, 1));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
        assert!((cache.stats().hit_rate() - 0.5).abs() < 1e-12);
    }
}
