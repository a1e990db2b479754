use crate::image_cache::RotationCache;
use crate::pivot::PivotSolver;
use corelib::gfx::Image;
use corelib::math::{Rect, Vec2};
use std::f64::consts::TAU;

/// Sprite swinging back and forth around the middle of its bottom edge.
///
/// The angle follows `half_arc * sin(2π * elapsed / period)` and is
/// truncated toward zero to whole degrees. The image and position are only
/// rebuilt when that whole-degree angle changes, which keeps both the
/// rotation work and the redraws down to one per degree crossed.
pub struct OscillatingRotator {
    base: Image,
    solver: PivotSolver,
    origin: Vec2,
    period: f64,
    elapsed: f64,
    half_arc: f64,
    angle: i32,
    image: Image,
    rect: Rect,
    dirty: bool,
    first_frame: bool,
}

impl OscillatingRotator {
    /// `pos` is where the middle of the bottom edge of `base` sits, which is
    /// also the pivot. `arc` is the full sweep in degrees and `start` the
    /// phase offset as a fraction of `period`.
    pub fn new<C: RotationCache>(
        base: &Image,
        pos: Vec2,
        period: f64,
        arc: u32,
        start: f64,
        cache: &mut C,
    ) -> Result<Self, String> {
        if !period.is_finite() || period <= 0.0 {
            return Err(format!("Oscillation period must be > 0, got {period}"));
        }

        if !start.is_finite() {
            return Err(format!("Invalid phase offset: {start}"));
        }

        let base_rect = Rect::from_mid_bottom(pos, base.size().as_vec2());
        let origin = base_rect.mid_bottom();
        let solver = PivotSolver::new(base_rect.center(), origin, 0.0)?;

        let mut rotator = Self {
            base: base.clone(),
            solver,
            origin,
            period,
            elapsed: period * start,
            half_arc: (arc / 2) as f64,
            angle: 0,
            image: base.clone(),
            rect: base_rect,
            dirty: true,
            first_frame: true,
        };
        rotator.rebuild(cache);

        Ok(rotator)
    }

    /// Moves the oscillation `dt` seconds forward
    pub fn advance<C: RotationCache>(&mut self, dt: f32, cache: &mut C) {
        self.elapsed += dt as f64;
        let interp = (TAU * (self.elapsed / self.period)).sin();
        self.elapsed = self.elapsed.rem_euclid(self.period);

        // truncation toward zero, not rounding
        let angle = (self.half_arc * interp).trunc() as i32;
        let changed = angle != self.angle;
        if changed {
            self.angle = angle;
            self.rebuild(cache);
        }

        self.dirty = changed || self.first_frame;
        self.first_frame = false;
    }

    fn rebuild<C: RotationCache>(&mut self, cache: &mut C) {
        self.image = cache.rotated(&self.base, self.angle);
        let center = self.solver.resolve(self.angle, self.origin);
        self.rect = Rect::from_center(center, self.image.size().as_vec2());
    }

    /// Whether the image or position changed in the last `advance`
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn current_image(&self) -> &Image {
        &self.image
    }

    #[inline]
    pub fn current_rect(&self) -> Rect {
        self.rect
    }

    /// Current whole-degree angle
    #[inline]
    pub fn angle(&self) -> i32 {
        self.angle
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[inline]
    pub fn half_arc(&self) -> f64 {
        self.half_arc
    }

    /// Pivot point, fixed for the lifetime of the rotator
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_cache::ImageCache;
    use corelib::gfx::Color;
    use corelib::math::vec2;

    const EPS: f32 = 1e-3;
    const TIME_EPS: f64 = 1e-6;

    fn beam() -> Image {
        Image::spotlight_beam(20, 100, Color::WHITE)
    }

    fn rotator(start: f64, cache: &mut ImageCache) -> OscillatingRotator {
        OscillatingRotator::new(&beam(), vec2(200.0, 520.0), 4.0, 140, start, cache).unwrap()
    }

    #[test]
    fn test_quarter_and_half_period() {
        let mut cache = ImageCache::new();
        let mut r = rotator(0.0, &mut cache);
        assert_eq!(r.half_arc(), 70.0);

        r.advance(0.0, &mut cache);
        assert_eq!(r.angle(), 0);

        r.advance(1.0, &mut cache);
        assert_eq!(r.angle(), 70, "quarter period is the max deflection");
        assert!(r.is_dirty());

        r.advance(1.0, &mut cache);
        assert_eq!(r.angle(), 0, "half period is back to the rest angle");
        assert!(r.is_dirty());

        r.advance(1.0, &mut cache);
        assert_eq!(r.angle(), -70);
    }

    #[test]
    fn test_phase_offset_is_a_fraction_of_the_period() {
        let mut cache = ImageCache::new();
        let mut r = rotator(1.0, &mut cache);
        assert!((r.elapsed() - 4.0).abs() < TIME_EPS);

        r.advance(0.0, &mut cache);
        assert!(r.elapsed().abs() < TIME_EPS, "elapsed should wrap to 0");
        assert_eq!(r.angle(), 0);

        let mut half = rotator(0.5, &mut cache);
        half.advance(0.0, &mut cache);
        assert!((half.elapsed() - 2.0).abs() < TIME_EPS);
        assert_eq!(half.angle(), 0);

        // half a period ahead means the opposite side
        let mut plain = rotator(0.0, &mut cache);
        half.advance(1.0, &mut cache);
        plain.advance(1.0, &mut cache);
        assert_eq!(half.angle(), -plain.angle());
    }

    #[test]
    fn test_negative_phase_wraps_into_the_period() {
        let mut cache = ImageCache::new();
        let mut r = rotator(-0.25, &mut cache);
        r.advance(0.0, &mut cache);
        assert!((r.elapsed() - 3.0).abs() < TIME_EPS, "got {}", r.elapsed());
        assert_eq!(r.angle(), -70);

        r.advance(2.0, &mut cache);
        assert!((r.elapsed() - 1.0).abs() < TIME_EPS, "got {}", r.elapsed());
        assert_eq!(r.angle(), 70);
    }

    #[test]
    fn test_split_advance_matches_single_advance() {
        let mut cache = ImageCache::new();
        let mut split = rotator(0.0, &mut cache);
        let mut single = rotator(0.0, &mut cache);

        split.advance(0.3, &mut cache);
        split.advance(0.2, &mut cache);
        single.advance(0.5, &mut cache);

        assert_eq!(split.angle(), single.angle());
        assert!((split.elapsed() - single.elapsed()).abs() < TIME_EPS);
    }

    #[test]
    fn test_angle_stays_within_the_arc() {
        let mut cache = ImageCache::new();
        for period in [0.1, 1.0, 4.0, 7.3] {
            let mut r =
                OscillatingRotator::new(&beam(), vec2(0.0, 0.0), period, 141, 0.25, &mut cache)
                    .unwrap();
            for _ in 0..2000 {
                r.advance(0.0137, &mut cache);
                assert!((-70..=70).contains(&r.angle()), "angle {}", r.angle());
                assert!(r.elapsed() >= 0.0 && r.elapsed() < period);
            }
        }
    }

    #[test]
    fn test_cache_computes_each_angle_once() {
        let mut cache = ImageCache::new();
        let base = beam();
        let mut lights: Vec<_> = (0..4)
            .map(|i| {
                let start = if i % 2 == 0 { 0.5 } else { 1.0 };
                let pos = vec2(i as f32 * 100.0, 500.0);
                OscillatingRotator::new(&base, pos, 4.0, 140, start, &mut cache).unwrap()
            })
            .collect();

        // every rotator starts at rest
        let mut visited = std::collections::BTreeSet::from([0]);
        let mut calls = 0;
        for _ in 0..1000 {
            for light in &mut lights {
                light.advance(1.0 / 60.0, &mut cache);
                visited.insert(light.angle());
                calls += 1;
            }
        }

        assert_eq!(cache.computed(), visited.len());
        assert!(cache.computed() < calls);
        assert_eq!(cache.angles(&base), visited.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_dirty_only_when_the_angle_changes() {
        let mut cache = ImageCache::new();
        let mut r = rotator(0.0, &mut cache);
        assert!(r.is_dirty(), "a new rotator needs a first draw");

        r.advance(0.0, &mut cache);
        assert!(r.is_dirty(), "the first frame is always dirty");

        // less than a degree of motion
        r.advance(0.001, &mut cache);
        assert_eq!(r.angle(), 0);
        assert!(!r.is_dirty());

        let mut previous = r.angle();
        for _ in 0..500 {
            r.advance(1.0 / 60.0, &mut cache);
            assert_eq!(r.is_dirty(), r.angle() != previous);
            previous = r.angle();
        }
    }

    #[test]
    fn test_truncates_toward_zero() {
        let mut cache = ImageCache::new();
        let mut r = rotator(0.0, &mut cache);

        // 70 * sin(x) = 0.9 and -0.9 must both land on 0
        let t = ((0.9f64 / 70.0).asin() / TAU * 4.0) as f32;
        r.advance(t, &mut cache);
        assert_eq!(r.angle(), 0);

        let mut r = rotator(0.5, &mut cache);
        r.advance(t, &mut cache);
        assert_eq!(r.angle(), 0);

        // 1.9 truncates to 1 and -1.9 to -1
        let t = ((1.9f64 / 70.0).asin() / TAU * 4.0) as f32;
        let mut r = rotator(0.0, &mut cache);
        r.advance(t, &mut cache);
        assert_eq!(r.angle(), 1);

        let mut r = rotator(0.5, &mut cache);
        r.advance(t, &mut cache);
        assert_eq!(r.angle(), -1);
    }

    #[test]
    fn test_rect_follows_the_pivot() {
        let mut cache = ImageCache::new();
        let mut r = rotator(0.0, &mut cache);
        let pivot = r.origin();
        assert_eq!(pivot, vec2(200.0, 520.0));
        assert!((r.current_rect().center() - vec2(200.0, 470.0)).length() < EPS);

        r.advance(1.0, &mut cache);
        let rect = r.current_rect();
        assert_eq!(rect.size(), r.current_image().size().as_vec2());

        // leaning left by 70 degrees, radius 50
        let (sin, cos) = 70f32.to_radians().sin_cos();
        let expected = vec2(200.0 - 50.0 * sin, 520.0 - 50.0 * cos);
        assert!((rect.center() - expected).length() < EPS, "got {}", rect.center());
    }

    #[test]
    fn test_invalid_period_is_rejected() {
        let mut cache = ImageCache::new();
        for period in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let res = OscillatingRotator::new(&beam(), Vec2::ZERO, period, 140, 0.0, &mut cache);
            assert!(res.is_err(), "period {period} should be rejected");
        }
    }
}
