pub use glam::*;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let origin = center - size * 0.5;
        Self { origin, size }
    }

    /// Rect placed with the middle of its bottom edge at `point`
    #[inline]
    pub fn from_mid_bottom(point: Vec2, size: Vec2) -> Self {
        let origin = vec2(point.x - size.x * 0.5, point.y - size.y);
        Self { origin, size }
    }

    #[inline]
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn mid_bottom(&self) -> Vec2 {
        vec2(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Smallest rect containing both
    #[inline]
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_min_max(self.min().min(other.min()), self.max().max(other.max()))
    }

    /// Snap to the pixel grid. The origin is rounded and the size rounded up,
    /// so an image placed at this rect keeps its pixel dimensions.
    #[inline]
    pub fn to_pixels(&self) -> PixelRect {
        let min = self.origin.round().as_ivec2();
        let size = self.size.ceil().as_ivec2().max(IVec2::ZERO);
        PixelRect { min, max: min + size }
    }
}

/// Integer rectangle with an exclusive `max` corner, used for blits
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub min: IVec2,
    pub max: IVec2,
}

impl PixelRect {
    #[inline]
    pub const fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// Rect covering a whole surface of `size`
    #[inline]
    pub fn from_size(size: UVec2) -> Self {
        Self {
            min: IVec2::ZERO,
            max: size.as_ivec2(),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        (self.max.x - self.min.x).max(0)
    }

    #[inline]
    pub fn height(&self) -> i32 {
        (self.max.y - self.min.y).max(0)
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Overlapping area of both rects, `None` if they don't overlap
    #[inline]
    pub fn intersection(&self, other: &PixelRect) -> Option<PixelRect> {
        let rect = PixelRect {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        };

        (!rect.is_empty()).then_some(rect)
    }

    #[inline]
    pub fn union(&self, other: &PixelRect) -> PixelRect {
        PixelRect {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}
