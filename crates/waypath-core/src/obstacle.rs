//! Static obstacles and the immutable [`ObstacleField`].

use std::ops::Deref;
use std::sync::Arc;

use crate::error::FieldError;
use crate::geometry::Point;
use crate::id::FieldInstanceId;

/// A static square or circular region centred on `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    /// Center of the obstacle; all distance queries measure to this point.
    pub center: Point,
    /// Edge length or diameter. Carried for rendering collaborators; the
    /// scoring heuristics only look at the center.
    pub size: f64,
}

impl Obstacle {
    /// Create an obstacle.
    pub const fn new(center: Point, size: f64) -> Self {
        Self { center, size }
    }
}

/// An ordered, immutable set of obstacles shared across threads.
///
/// Insertion order is significant: nearest-neighbour ties are broken by
/// it. The field is cheap to clone (`Arc`) and every clone carries the
/// same [`FieldInstanceId`].
#[derive(Clone, Debug)]
pub struct ObstacleField {
    obstacles: Arc<[Obstacle]>,
    instance_id: FieldInstanceId,
}

impl ObstacleField {
    /// Build a field, validating every obstacle.
    pub fn new(obstacles: Vec<Obstacle>) -> Result<Self, FieldError> {
        for (index, o) in obstacles.iter().enumerate() {
            if !o.center.is_finite() || !o.size.is_finite() {
                return Err(FieldError::NonFiniteObstacle {
                    index,
                    x: o.center.x,
                    y: o.center.y,
                    size: o.size,
                });
            }
            if o.size < 0.0 {
                return Err(FieldError::NegativeSize {
                    index,
                    size: o.size,
                });
            }
        }
        Ok(Self {
            obstacles: obstacles.into(),
            instance_id: FieldInstanceId::next(),
        })
    }

    /// A field with no obstacles.
    pub fn empty() -> Self {
        Self {
            obstacles: Vec::<Obstacle>::new().into(),
            instance_id: FieldInstanceId::next(),
        }
    }

    /// Identity of this obstacle set for cache invalidation.
    pub fn instance_id(&self) -> FieldInstanceId {
        self.instance_id
    }

    /// The obstacles in insertion order.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

impl Deref for ObstacleField {
    type Target = [Obstacle];

    fn deref(&self) -> &[Obstacle] {
        &self.obstacles
    }
}
