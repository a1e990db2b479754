use super::{Color, Image};
use crate::math::{IVec2, PixelRect, UVec2};
use image::RgbaImage;
use std::path::Path;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum BlendMode {
    /// Regular "over" alpha blending
    #[default]
    Alpha,
    /// Adds the source rgb (weighted by its alpha) to the destination
    Add,
}

/// Counters for what was sent to the display
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct PresentStats {
    pub frames: u64,
    pub regions: u64,
    pub pixels: u64,
}

/// Software render target. Drawing happens in memory and `present`
/// flushes only the given regions, which is where the dirty-rect
/// savings are measured.
pub struct Canvas {
    target: RgbaImage,
    stats: PresentStats,
}

impl Canvas {
    pub fn new(size: UVec2, color: Color) -> Self {
        let target = RgbaImage::from_pixel(size.x, size.y, image::Rgba(color.to_rgba_u8()));
        Self {
            target,
            stats: PresentStats::default(),
        }
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.target.width(), self.target.height())
    }

    #[inline]
    pub fn bounds(&self) -> PixelRect {
        PixelRect::from_size(self.size())
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.target.get_pixel_checked(x, y).map(|p| p.0)
    }

    #[inline]
    pub fn stats(&self) -> PresentStats {
        self.stats
    }

    pub fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let Some(rect) = self.bounds().intersection(&rect) else {
            return;
        };

        let px = image::Rgba(color.to_rgba_u8());
        for y in rect.min.y..rect.max.y {
            for x in rect.min.x..rect.max.x {
                self.target.put_pixel(x as u32, y as u32, px);
            }
        }
    }

    /// Draws `image` with its top-left corner at `pos`, limited to `clip`
    /// when given. Everything is clipped to the canvas bounds.
    pub fn blit(&mut self, image: &Image, pos: IVec2, clip: Option<PixelRect>, mode: BlendMode) {
        let dest = PixelRect::new(pos, pos + image.size().as_ivec2());
        let Some(mut area) = self.bounds().intersection(&dest) else {
            return;
        };

        if let Some(clip) = clip {
            match area.intersection(&clip) {
                Some(a) => area = a,
                None => return,
            }
        }

        let src = image.raw();
        for y in area.min.y..area.max.y {
            for x in area.min.x..area.max.x {
                let s = src.get_pixel((x - pos.x) as u32, (y - pos.y) as u32).0;
                if s[3] == 0 {
                    continue;
                }

                let d = self.target.get_pixel_mut(x as u32, y as u32);
                d.0 = blend(d.0, s, mode);
            }
        }
    }

    /// Flush the given regions to the display
    pub fn present(&mut self, regions: &[PixelRect]) {
        let bounds = self.bounds();
        let pixels: u64 = regions
            .iter()
            .filter_map(|r| bounds.intersection(r))
            .map(|r| r.area())
            .sum();

        self.stats.frames += 1;
        self.stats.regions += regions.len() as u64;
        self.stats.pixels += pixels;
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        self.target
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| e.to_string())
    }
}

#[inline]
fn blend(dst: [u8; 4], src: [u8; 4], mode: BlendMode) -> [u8; 4] {
    let alpha = src[3] as f32 / 255.0;
    let mix = |d: u8, s: u8| -> u8 {
        let (d, s) = (d as f32, s as f32);
        let v = match mode {
            BlendMode::Alpha => s * alpha + d * (1.0 - alpha),
            BlendMode::Add => d + s * alpha,
        };
        v.round().clamp(0.0, 255.0) as u8
    };

    let a = match mode {
        BlendMode::Alpha => mix(dst[3], 255),
        BlendMode::Add => dst[3],
    };

    [mix(dst[0], src[0]), mix(dst[1], src[1]), mix(dst[2], src[2]), a]
}
