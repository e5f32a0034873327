//! The map a road is built on.

use waypath_core::{Bounds, Course, FieldError, Obstacle, ObstacleField, Path};

/// Read access to an obstacle map plus a slot for the finished road.
///
/// Implemented by whatever owns the map (a renderer, a level editor);
/// [`Forest`] is the plain in-memory version.
pub trait ForestModel {
    /// Obstacles, in insertion order.
    fn organisms(&self) -> &[Obstacle];
    /// Map width; also the destination `x`.
    fn screen_width(&self) -> f64;
    /// Map height; also the destination `y`.
    fn screen_height(&self) -> f64;
    /// Store the published road.
    fn set_road(&mut self, road: Path);
    /// The published road, if any.
    fn road(&self) -> Option<&Path>;

    /// Corner-to-corner course for this map.
    fn course(&self) -> Result<Course, FieldError> {
        Course::for_screen(self.screen_width(), self.screen_height())
    }
}

/// An obstacle field with a screen size and an optional road.
#[derive(Clone, Debug)]
pub struct Forest {
    field: ObstacleField,
    width: f64,
    height: f64,
    road: Option<Path>,
}

impl Forest {
    /// Create a forest, validating the screen size.
    pub fn new(field: ObstacleField, width: f64, height: f64) -> Result<Self, FieldError> {
        // Same check `Course::for_screen` will apply.
        Bounds::new(width, height)?;
        Ok(Self {
            field,
            width,
            height,
            road: None,
        })
    }

    /// The shared obstacle field.
    pub fn field(&self) -> &ObstacleField {
        &self.field
    }
}

impl ForestModel for Forest {
    fn organisms(&self) -> &[Obstacle] {
        self.field.obstacles()
    }

    fn screen_width(&self) -> f64 {
        self.width
    }

    fn screen_height(&self) -> f64 {
        self.height
    }

    fn set_road(&mut self, road: Path) {
        self.road = Some(road);
    }

    fn road(&self) -> Option<&Path> {
        self.road.as_ref()
    }
}
