use crate::config::SceneConfig;
use crate::image_cache::ImageCache;
use crate::rotator::OscillatingRotator;
use corelib::gfx::{BlendMode, Canvas, Color, Image};
use corelib::math::{PixelRect, vec2};
use smallvec::SmallVec;

const REGIONS_HINT: usize = 16;

/// A row of spotlights drawn with dirty rectangles.
///
/// Only the areas touched by lights that changed since the last frame are
/// cleared and redrawn, every other pixel is left as is.
pub struct Scene {
    background: Color,
    lights: Vec<OscillatingRotator>,
    cache: ImageCache,
    drawn_rects: Vec<PixelRect>,
    // lights that changed since the last draw, across any number of updates
    pending: Vec<bool>,
    regions: SmallVec<PixelRect, REGIONS_HINT>,
    needs_full_redraw: bool,
}

impl Scene {
    pub fn new(config: &SceneConfig, base: Image) -> Result<Self, String> {
        config.validate()?;

        let [width, height] = config.size;
        let count = config.lights;
        let y = height as f32 + config.y_offset;
        let step = width as f32 / (count + 1) as f32;

        let mut cache = ImageCache::new();
        let lights = (1..=count)
            .map(|i| {
                let start = if i % 2 == 1 {
                    config.phase_odd
                } else {
                    config.phase_even
                };
                let pos = vec2(i as f32 * step, y);
                OscillatingRotator::new(&base, pos, config.period, config.arc, start, &mut cache)
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Scene created with {count} lights, period={}s, arc={}deg",
            config.period,
            config.arc
        );

        let drawn_rects = lights.iter().map(|l| l.current_rect().to_pixels()).collect();
        let pending = vec![false; lights.len()];
        Ok(Self {
            background: config.background.into(),
            lights,
            cache,
            drawn_rects,
            pending,
            regions: SmallVec::new(),
            needs_full_redraw: true,
        })
    }

    /// Advance every light `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let cache = &mut self.cache;
        for (light, pending) in self.lights.iter_mut().zip(self.pending.iter_mut()) {
            light.advance(dt, cache);
            *pending |= light.is_dirty();
        }
    }

    /// Redraws the areas that changed and returns them so the caller can
    /// present only those. The first call redraws the whole canvas.
    pub fn draw(&mut self, canvas: &mut Canvas) -> &[PixelRect] {
        self.regions.clear();

        if self.needs_full_redraw {
            self.regions.push(canvas.bounds());
            self.needs_full_redraw = false;
        } else {
            let lights = self.lights.iter().zip(&self.drawn_rects).zip(&self.pending);
            for ((light, drawn), pending) in lights {
                if !pending {
                    continue;
                }

                // old area to erase and new area to paint
                self.regions.push(*drawn);
                self.regions.push(light.current_rect().to_pixels());
            }
        }

        let bounds = canvas.bounds();
        let mut clipped: SmallVec<PixelRect, REGIONS_HINT> = self
            .regions
            .iter()
            .filter_map(|r| bounds.intersection(r))
            .collect();
        merge_overlapping(&mut clipped);
        self.regions = clipped;

        for region in self.regions.iter() {
            canvas.fill_rect(*region, self.background);
        }

        for (light, drawn) in self.lights.iter().zip(self.drawn_rects.iter_mut()) {
            let rect = light.current_rect().to_pixels();
            for region in self.regions.iter() {
                if rect.intersection(region).is_some() {
                    canvas.blit(light.current_image(), rect.min, Some(*region), BlendMode::Add);
                }
            }

            *drawn = rect;
        }

        self.pending.fill(false);
        &self.regions
    }

    /// Forces the next `draw` to repaint the whole canvas
    #[inline]
    pub fn invalidate(&mut self) {
        self.needs_full_redraw = true;
    }

    #[inline]
    pub fn lights(&self) -> &[OscillatingRotator] {
        &self.lights
    }

    #[inline]
    pub fn image_cache(&self) -> &ImageCache {
        &self.cache
    }

    #[inline]
    pub fn background(&self) -> Color {
        self.background
    }
}

// Regions must not overlap, additive blits would paint twice on the overlap
fn merge_overlapping(regions: &mut SmallVec<PixelRect, REGIONS_HINT>) {
    let mut i = 0;
    while i < regions.len() {
        let mut merged = false;
        let mut j = i + 1;
        while j < regions.len() {
            if regions[i].intersection(&regions[j]).is_some() {
                let other = regions.swap_remove(j);
                regions[i] = regions[i].union(&other);
                merged = true;
            } else {
                j += 1;
            }
        }

        // a grown rect may now touch earlier ones
        if merged {
            i = 0;
        } else {
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::math::{ivec2, uvec2};

    fn config() -> SceneConfig {
        SceneConfig::default().beam_size(60, 300)
    }

    fn scene() -> (Scene, Canvas) {
        let config = config();
        let base = Image::spotlight_beam(60, 300, Color::WHITE);
        let scene = Scene::new(&config, base).unwrap();
        let canvas = Canvas::new(uvec2(1000, 500), scene.background());
        (scene, canvas)
    }

    #[test]
    fn test_lights_are_spread_across_the_screen() {
        let (scene, _) = scene();
        let origins: Vec<_> = scene.lights().iter().map(|l| l.origin()).collect();
        assert_eq!(
            origins,
            vec![
                vec2(200.0, 520.0),
                vec2(400.0, 520.0),
                vec2(600.0, 520.0),
                vec2(800.0, 520.0)
            ]
        );

        let phases: Vec<_> = scene.lights().iter().map(|l| l.elapsed()).collect();
        assert_eq!(phases, vec![4.0, 2.0, 4.0, 2.0]);
    }

    #[test]
    fn test_first_draw_covers_the_screen() {
        let (mut scene, mut canvas) = scene();
        scene.update(0.0);
        let regions = scene.draw(&mut canvas).to_vec();
        assert_eq!(regions, vec![canvas.bounds()]);

        // lit pixel right above a pivot, untouched corner
        assert_ne!(canvas.pixel(200, 495), Some([5, 5, 15, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([5, 5, 15, 255]));
    }

    #[test]
    fn test_nothing_is_drawn_without_changes() {
        let (mut scene, mut canvas) = scene();
        scene.update(0.0);
        scene.draw(&mut canvas);

        // far less than a degree
        scene.update(0.001);
        assert!(scene.lights().iter().all(|l| !l.is_dirty()));
        assert!(scene.draw(&mut canvas).is_empty());
    }

    #[test]
    fn test_changed_lights_redraw_old_and_new_areas() {
        let (mut scene, mut canvas) = scene();
        scene.update(0.0);
        scene.draw(&mut canvas);

        let before: Vec<_> = scene.lights().iter().map(|l| l.current_rect().to_pixels()).collect();
        scene.update(0.5);
        let after: Vec<_> = scene.lights().iter().map(|l| l.current_rect().to_pixels()).collect();
        let regions = scene.draw(&mut canvas).to_vec();
        assert!(!regions.is_empty());

        // every visible part of the old and new rects is inside a region
        let bounds = canvas.bounds();
        for rect in before.iter().chain(after.iter()) {
            let Some(visible) = bounds.intersection(rect) else {
                continue;
            };
            assert!(
                regions.iter().any(|r| r.intersection(&visible) == Some(visible)),
                "{visible:?} not covered by {regions:?}"
            );
        }

        // and regions never overlap
        for (i, a) in regions.iter().enumerate() {
            for b in regions.iter().skip(i + 1) {
                assert!(a.intersection(b).is_none(), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_partial_redraw_matches_full_redraw() {
        let (mut partial, mut partial_canvas) = scene();
        let (mut full, mut full_canvas) = scene();

        for _ in 0..30 {
            partial.update(1.0 / 30.0);
            partial.draw(&mut partial_canvas);

            full.update(1.0 / 30.0);
            full.invalidate();
            full.draw(&mut full_canvas);
        }

        for y in (0..500).step_by(7) {
            for x in (0..1000).step_by(7) {
                assert_eq!(
                    partial_canvas.pixel(x, y),
                    full_canvas.pixel(x, y),
                    "pixel ({x}, {y}) differs"
                );
            }
        }
    }

    #[test]
    fn test_several_updates_before_a_draw() {
        let (mut stepped, mut stepped_canvas) = scene();
        let (mut full, mut full_canvas) = scene();
        stepped.update(0.0);
        stepped.draw(&mut stepped_canvas);

        // lights move in the first update and settle in the second
        stepped.update(0.5);
        stepped.update(0.0001);
        assert!(stepped.lights().iter().all(|l| !l.is_dirty()));
        assert!(!stepped.draw(&mut stepped_canvas).is_empty());

        full.update(0.5001);
        full.invalidate();
        full.draw(&mut full_canvas);

        let mut differing = 0;
        for y in 0..500 {
            for x in 0..1000 {
                if stepped_canvas.pixel(x, y) != full_canvas.pixel(x, y) {
                    differing += 1;
                }
            }
        }
        assert_eq!(differing, 0, "stale pixels left on the canvas");
        assert!(stepped.draw(&mut stepped_canvas).is_empty());
    }

    #[test]
    fn test_lights_share_the_image_cache() {
        let (mut scene, _) = scene();
        for _ in 0..600 {
            scene.update(1.0 / 60.0);
        }

        // all lights swing through the same angles, each rotated once
        let cache = scene.image_cache();
        assert_eq!(cache.computed(), cache.len());
        assert!(cache.computed() <= 141, "got {}", cache.computed());
    }

    #[test]
    fn test_merge_overlapping() {
        let mut regions: SmallVec<PixelRect, REGIONS_HINT> = SmallVec::new();
        regions.push(PixelRect::new(ivec2(0, 0), ivec2(10, 10)));
        regions.push(PixelRect::new(ivec2(20, 0), ivec2(30, 10)));
        regions.push(PixelRect::new(ivec2(5, 5), ivec2(25, 8)));
        regions.push(PixelRect::new(ivec2(100, 100), ivec2(110, 110)));
        merge_overlapping(&mut regions);

        let mut out = regions.to_vec();
        out.sort_by_key(|r| r.min.x);
        assert_eq!(
            out,
            vec![
                PixelRect::new(ivec2(0, 0), ivec2(30, 10)),
                PixelRect::new(ivec2(100, 100), ivec2(110, 110)),
            ]
        );
    }

    #[test]
    fn test_invalid_config_fails() {
        let config = config().period(0.0);
        let base = Image::spotlight_beam(10, 10, Color::WHITE);
        assert!(Scene::new(&config, base).is_err());
    }
}
