use corelib::math::{Vec2, vec2};
use utils::memo_cache::MemoCache;

/// Hashable pivot point. Two pivots are the same key when their
/// coordinates are the same numbers, wherever they came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PivotKey {
    x: u32,
    y: u32,
}

impl From<Vec2> for PivotKey {
    fn from(p: Vec2) -> Self {
        // -0.0 and 0.0 are the same point
        let bits = |v: f32| if v == 0.0 { 0 } else { v.to_bits() };
        Self {
            x: bits(p.x),
            y: bits(p.y),
        }
    }
}

/// Resolves where the center of a sprite ends up when the sprite rotates
/// around a fixed pivot that is not its own center.
///
/// Angles are in degrees, counter-clockwise as seen on screen. Results are
/// memoized by `(angle, pivot)` so only the first query of an angle pays
/// for the trigonometry.
pub struct PivotSolver {
    radius: f32,
    start_angle: f32,
    cache: MemoCache<(i32, PivotKey), Vec2>,
}

impl PivotSolver {
    /// `center` is the sprite center when not rotated, `pivot` the point it
    /// rotates around and `image_angle` the orientation (degrees) the sprite
    /// already has.
    pub fn new(center: Vec2, pivot: Vec2, image_angle: f32) -> Result<Self, String> {
        if !center.is_finite() || !pivot.is_finite() || !image_angle.is_finite() {
            return Err(format!(
                "PivotSolver needs finite values: center={center}, pivot={pivot}, angle={image_angle}"
            ));
        }

        let offset = center - pivot;
        // screen y grows downwards, the angle is measured with y up
        let start_angle = (-offset.y).atan2(offset.x) - image_angle.to_radians();

        Ok(Self {
            radius: offset.length(),
            start_angle,
            cache: MemoCache::new(),
        })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Angle in radians of the sprite center around the pivot at rotation 0
    #[inline]
    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    /// Center position for the sprite rotated `angle` degrees around `pivot`
    pub fn resolve(&mut self, angle: i32, pivot: Vec2) -> Vec2 {
        let (radius, start_angle) = (self.radius, self.start_angle);
        *self
            .cache
            .get_or_insert_with((angle, PivotKey::from(pivot)), || {
                let phi = (angle as f32).to_radians() + start_angle;
                let (sin, cos) = phi.sin_cos();
                vec2(pivot.x + radius * cos, pivot.y - radius * sin)
            })
    }

    /// Number of positions already computed
    #[inline]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
