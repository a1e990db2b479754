use corelib::gfx::{Image, ImageId};
use parking_lot::Mutex;
use std::sync::Arc;
use utils::memo_cache::MemoCache;

/// Identifies a rotated image by its source and the rotation in degrees
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RotationKey {
    pub image: ImageId,
    pub angle: i32,
}

/// Something able to hand out `base` rotated by `angle` degrees
pub trait RotationCache {
    fn rotated(&mut self, base: &Image, angle: i32) -> Image;
}

/// Rotated images shared by every sprite of the same base image. The
/// rotation only depends on the source and the angle, so each pair is
/// rotated once for the lifetime of the cache.
#[derive(Default)]
pub struct ImageCache {
    inner: MemoCache<RotationKey, Image>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached rotation, rotating `base` on a miss
    pub fn get_or_rotate(&mut self, base: &Image, angle: i32) -> Image {
        self.get_or_insert_with(base, angle, |img| img.rotated(angle as f32))
    }

    /// Like `get_or_rotate` but with a custom rotate function
    pub fn get_or_insert_with<F>(&mut self, base: &Image, angle: i32, rotate: F) -> Image
    where
        F: FnOnce(&Image) -> Image,
    {
        let key = RotationKey {
            image: base.id(),
            angle,
        };

        self.inner
            .get_or_insert_with(key, || {
                log::trace!("ImageCache miss for {key:?}");
                rotate(base)
            })
            .clone()
    }

    #[inline]
    pub fn contains(&self, base: &Image, angle: i32) -> bool {
        self.inner.contains_key(&RotationKey {
            image: base.id(),
            angle,
        })
    }

    /// How many rotations were computed
    #[inline]
    pub fn computed(&self) -> usize {
        self.inner.misses()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Sorted angles cached for `base`
    pub fn angles(&self, base: &Image) -> Vec<i32> {
        let id = base.id();
        let mut angles: Vec<i32> = self
            .inner
            .keys()
            .filter(|k| k.image == id)
            .map(|k| k.angle)
            .collect();
        angles.sort_unstable();
        angles
    }
}

impl RotationCache for ImageCache {
    #[inline]
    fn rotated(&mut self, base: &Image, angle: i32) -> Image {
        self.get_or_rotate(base, angle)
    }
}

/// `ImageCache` that can be used from several threads. The lock is held
/// while rotating, so two threads missing the same angle rotate it once.
#[derive(Clone, Default)]
pub struct SharedImageCache(Arc<Mutex<ImageCache>>);

impl SharedImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get_or_rotate(&self, base: &Image, angle: i32) -> Image {
        self.0.lock().get_or_rotate(base, angle)
    }

    #[inline]
    pub fn computed(&self) -> usize {
        self.0.lock().computed()
    }
}

impl RotationCache for SharedImageCache {
    #[inline]
    fn rotated(&mut self, base: &Image, angle: i32) -> Image {
        self.get_or_rotate(base, angle)
    }
}
