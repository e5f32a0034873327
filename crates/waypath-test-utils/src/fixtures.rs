//! Deterministic obstacle fields and courses.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use waypath_core::{Course, Obstacle, ObstacleField, Point};

/// `count` obstacles uniformly scattered over `[0, width) × [0, height)`.
///
/// The same seed always yields the same field (ChaCha8).
pub fn scattered_field(seed: u64, count: usize, width: f64, height: f64) -> ObstacleField {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let obstacles = (0..count)
        .map(|_| {
            let center = Point::new(rng.random_range(0.0..width), rng.random_range(0.0..height));
            Obstacle::new(center, rng.random_range(2.0..6.0))
        })
        .collect();
    ObstacleField::new(obstacles).expect("scattered obstacles are finite")
}

/// Size-3 obstacles at each `x` in `xs`, all on the horizontal line `y`.
pub fn line_field(xs: &[f64], y: f64) -> ObstacleField {
    let obstacles = xs
        .iter()
        .map(|&x| Obstacle::new(Point::new(x, y), 3.0))
        .collect();
    ObstacleField::new(obstacles).expect("line obstacles are finite")
}

/// The default 900×600 course from the origin to the far corner.
pub fn screen_course() -> Course {
    Course::for_screen(900.0, 600.0).expect("positive screen size")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scattered_is_seeded() {
        let a = scattered_field(3, 20, 900.0, 600.0);
        let b = scattered_field(3, 20, 900.0, 600.0);
        assert_eq!(a.obstacles(), b.obstacles());
        assert_ne!(a.instance_id(), b.instance_id());
        assert!(a
            .iter()
            .all(|o| (0.0..900.0).contains(&o.center.x) && (0.0..600.0).contains(&o.center.y)));
    }

    #[test]
    fn line_keeps_order() {
        let f = line_field(&[5.0, 1.0], 2.0);
        assert_eq!(f[0].center, Point::new(5.0, 2.0));
        assert_eq!(f[1].center, Point::new(1.0, 2.0));
    }
}
