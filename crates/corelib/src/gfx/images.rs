use super::Color;
use crate::math::{UVec2, Vec2, uvec2, vec2};
use image::{Rgba, RgbaImage};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct ImageId(u64);

impl ImageId {
    fn next() -> Self {
        Self(NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl From<ImageId> for u64 {
    fn from(value: ImageId) -> Self {
        value.0
    }
}

/// Immutable RGBA image handle. Cloning is cheap and keeps the same id.
#[derive(Clone)]
pub struct Image {
    id: ImageId,
    raw: Arc<RgbaImage>,
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("id", &self.id)
            .field("size", &self.size())
            .finish()
    }
}

impl Image {
    pub fn from_raw(raw: RgbaImage) -> Self {
        Self {
            id: ImageId::next(),
            raw: Arc::new(raw),
        }
    }

    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, String> {
        let raw = RgbaImage::from_raw(width, height, bytes).ok_or_else(|| {
            format!("Invalid RGBA buffer length for an image of {width}x{height}")
        })?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| format!("Cannot load '{}': {e}", path.display()))?;
        log::debug!("Loaded image '{}' ({}x{})", path.display(), img.width(), img.height());
        Ok(Self::from_raw(img.into_rgba8()))
    }

    /// Procedural light cone, narrow at the bottom center and opening upwards
    pub fn spotlight_beam(width: u32, height: u32, color: Color) -> Self {
        let [r, g, b, a] = color.to_rgba_u8();
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let raw = RgbaImage::from_fn(width.max(1), height.max(1), |x, y| {
            // 0 at the source (bottom), 1 at the far end (top)
            let t = 1.0 - (y as f32 + 0.5) / h;
            let half_width = w * 0.5 * (0.08 + 0.92 * t);
            let dx = ((x as f32 + 0.5) - w * 0.5).abs();
            if dx >= half_width {
                return Rgba([r, g, b, 0]);
            }

            let across = 1.0 - dx / half_width;
            let intensity = across * across * (1.0 - 0.7 * t);
            Rgba([r, g, b, (intensity * a as f32).round() as u8])
        });

        Self::from_raw(raw)
    }

    #[inline]
    pub fn id(&self) -> ImageId {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.raw.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.raw.height()
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        uvec2(self.raw.width(), self.raw.height())
    }

    #[inline]
    pub fn raw(&self) -> &RgbaImage {
        &self.raw
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.raw.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Rotates the image counter-clockwise (as seen on screen) about its
    /// center. The output is sized to the rotated bounding box so the visual
    /// center is preserved, pixels outside the source are transparent.
    pub fn rotated(&self, degrees: f32) -> Image {
        if degrees == 0.0 {
            return self.clone();
        }

        let (sin, cos) = degrees.to_radians().sin_cos();
        let (w, h) = (self.width() as f32, self.height() as f32);

        // tolerance avoids an extra pixel row from float noise at right angles
        let out_w = (w * cos.abs() + h * sin.abs() - 1e-3).ceil().max(1.0) as u32;
        let out_h = (w * sin.abs() + h * cos.abs() - 1e-3).ceil().max(1.0) as u32;

        let src_center = vec2(w, h) * 0.5;
        let dst_center = vec2(out_w as f32, out_h as f32) * 0.5;

        let raw = RgbaImage::from_fn(out_w, out_h, |x, y| {
            let d = vec2(x as f32 + 0.5, y as f32 + 0.5) - dst_center;
            // inverse mapping back into the source image
            let src = vec2(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + src_center;
            Rgba(sample_bilinear(&self.raw, src - 0.5))
        });

        log::trace!(
            "Rotated image {:?} by {degrees}deg into {out_w}x{out_h}",
            self.id
        );

        Image::from_raw(raw)
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        self.raw
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| e.to_string())
    }
}

#[inline]
fn texel(img: &RgbaImage, x: i64, y: i64) -> [f32; 4] {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return [0.0; 4];
    }

    let [r, g, b, a] = img.get_pixel(x as u32, y as u32).0;
    let alpha = a as f32 / 255.0;
    [r as f32 * alpha, g as f32 * alpha, b as f32 * alpha, a as f32]
}

// Samples with premultiplied alpha so transparent neighbours don't darken edges
fn sample_bilinear(img: &RgbaImage, pos: Vec2) -> [u8; 4] {
    let base = pos.floor();
    let f = pos - base;
    let (x0, y0) = (base.x as i64, base.y as i64);

    let tl = texel(img, x0, y0);
    let tr = texel(img, x0 + 1, y0);
    let bl = texel(img, x0, y0 + 1);
    let br = texel(img, x0 + 1, y0 + 1);

    let mut acc = [0.0f32; 4];
    for i in 0..4 {
        let top = tl[i] + (tr[i] - tl[i]) * f.x;
        let bottom = bl[i] + (br[i] - bl[i]) * f.x;
        acc[i] = top + (bottom - top) * f.y;
    }

    let a = acc[3];
    if a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let alpha = a / 255.0;
    let unpremul = |v: f32| (v / alpha).round().clamp(0.0, 255.0) as u8;
    [
        unpremul(acc[0]),
        unpremul(acc[1]),
        unpremul(acc[2]),
        a.round().clamp(0.0, 255.0) as u8,
    ]
}
