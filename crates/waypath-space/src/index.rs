//! [`SpatialIndex`]: memoized k-nearest-obstacle queries.

use smallvec::SmallVec;
use tracing::trace;
use waypath_core::{Obstacle, ObstacleField, Point};

use crate::cache::{
    CacheConfig, CacheKey, CacheStats, NearestCache, NeighbourIndices, QuantizedPoint,
};
use crate::error::SpaceError;

/// Up to `k` obstacles, nearest first.
pub type Neighbours = SmallVec<[Obstacle; 16]>;

/// k-nearest-obstacle lookups over one [`ObstacleField`], memoized.
///
/// Results are sorted by ascending Euclidean distance from the query to
/// each obstacle's center; equal distances keep insertion order. The
/// query is evaluated at the quantized key point (see
/// [`QuantizedPoint`]), which makes every answer a pure function of
/// `(key, field)` regardless of what the cache has seen before.
///
/// An index is single-owner (`&mut self` queries). Worker threads each
/// hold their own index over a shared field; fields are `Arc`-backed so
/// this costs one cache per worker and no locking.
///
/// # Example
///
/// ```
/// use waypath_core::{Obstacle, ObstacleField, Point};
/// use waypath_space::{CacheConfig, SpatialIndex};
///
/// let field = ObstacleField::new(vec![
///     Obstacle::new(Point::new(10.0, 0.0), 3.0),
///     Obstacle::new(Point::new(2.0, 0.0), 3.0),
/// ])
/// .unwrap();
/// let mut index = SpatialIndex::new(field, &CacheConfig::default()).unwrap();
/// let near = index.nearest(Point::ZERO, 1).unwrap();
/// assert_eq!(near[0].center, Point::new(2.0, 0.0));
/// ```
#[derive(Debug)]
pub struct SpatialIndex {
    field: ObstacleField,
    cache: NearestCache,
    resolution: f64,
}

impl SpatialIndex {
    /// Build an index over `field` with a cache sized by `config`.
    pub fn new(field: ObstacleField, config: &CacheConfig) -> Result<Self, SpaceError> {
        config.validate()?;
        let mut cache = NearestCache::new(config.capacity);
        cache.bind(field.instance_id());
        Ok(Self {
            field,
            cache,
            resolution: config.resolution,
        })
    }

    /// The obstacle set being queried.
    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    /// Replace the obstacle set, dropping cached answers if it differs.
    pub fn set_field(&mut self, field: ObstacleField) {
        if self.cache.bind(field.instance_id()) {
            trace!(field = %field.instance_id(), "obstacle field changed, nearest cache cleared");
        }
        self.field = field;
    }

    /// The `k` obstacles nearest to `point`, nearest first.
    ///
    /// Returns fewer than `k` when the field is smaller, and nothing for
    /// `k == 0`.
    pub fn nearest(&mut self, point: Point, k: usize) -> Result<Neighbours, SpaceError> {
        let key = CacheKey {
            point: QuantizedPoint::quantize(point, self.resolution)?,
            k,
        };
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.iter().map(|&i| self.field[i]).collect());
        }
        let indices = rank_nearest(&self.field, key.point.to_point(self.resolution), k);
        let result = indices.iter().map(|&i| self.field[i]).collect();
        self.cache.insert(key, indices);
        Ok(result)
    }

    /// Drop every cached answer.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Cache counters since construction.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of cached answers.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

/// Indices of the `k` obstacles nearest to `query`, nearest first,
/// ties by index.
fn rank_nearest(field: &[Obstacle], query: Point, k: usize) -> NeighbourIndices {
    let k = k.min(field.len());
    if k == 0 {
        return NeighbourIndices::new();
    }

    let mut ranked: Vec<(f64, usize)> = field
        .iter()
        .enumerate()
        .map(|(i, o)| (o.center.distance(query), i))
        .collect();
    let by_distance_then_index =
        |a: &(f64, usize), b: &(f64, usize)| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1));

    if k < ranked.len() {
        ranked.select_nth_unstable_by(k - 1, by_distance_then_index);
        ranked.truncate(k);
    }
    ranked.sort_unstable_by(by_distance_then_index);
    ranked.into_iter().map(|(_, i)| i).collect()
}
