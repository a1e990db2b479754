use crate::config::SceneConfig;
use crate::scene::Scene;
use corelib::events::{Event, EventSource};
use corelib::gfx::{Canvas, Color, Image, PresentStats};
use corelib::limiter::FpsLimiter;
use corelib::math::uvec2;
use corelib::time::Clock;

/// What happened during a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub frames: u64,
    pub present: PresentStats,
    pub rotations: usize,
}

/// Owns the render target and the scene, and drives the frame loop
pub struct App {
    title: String,
    canvas: Canvas,
    scene: Scene,
}

impl App {
    pub fn new(config: &SceneConfig) -> Result<Self, String> {
        config.validate()?;

        let base = match &config.image {
            Some(path) => Image::from_file(path)?,
            None => {
                let [w, h] = config.beam_size;
                let [r, g, b, a] = config.beam_color;
                Image::spotlight_beam(w, h, Color::rgba_u8(r, g, b, a))
            }
        };

        let [width, height] = config.size;
        let canvas = Canvas::new(uvec2(width, height), config.background.into());
        let scene = Scene::new(config, base)?;

        log::info!("{} ready ({width}x{height})", config.title);
        Ok(Self {
            title: config.title.clone(),
            canvas,
            scene,
        })
    }

    /// Runs frames until the event source asks to quit
    pub fn run<C, E>(&mut self, clock: &mut C, events: &mut E, limiter: &mut FpsLimiter) -> RunStats
    where
        C: Clock,
        E: EventSource,
    {
        let mut frames = 0;
        let mut since_caption = 0.0;

        // start measuring from here, not from the setup
        clock.tick();

        loop {
            if events.poll().contains(&Event::Quit) {
                log::debug!("Quit requested after {frames} frames");
                break;
            }

            let dt = clock.tick();
            self.frame(dt);
            frames += 1;

            since_caption += dt;
            if since_caption >= 1.0 {
                since_caption = 0.0;
                log::info!("{}", self.caption(clock.fps()));
            }

            limiter.tick();
        }

        let stats = RunStats {
            frames,
            present: self.canvas.stats(),
            rotations: self.scene.image_cache().computed(),
        };
        log::info!("Run finished: {stats:?}");
        stats
    }

    /// Update, draw and present a single frame
    pub fn frame(&mut self, dt: f32) {
        self.scene.update(dt);
        let regions = self.scene.draw(&mut self.canvas);
        self.canvas.present(regions);
    }

    #[inline]
    pub fn caption(&self, fps: f32) -> String {
        format!("{} - FPS: {fps:.2}", self.title)
    }

    #[inline]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}
