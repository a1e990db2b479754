use utils::ring_buffer::RingBuffer;

pub use web_time::{Duration, Instant};

/// Source of per-frame elapsed time
pub trait Clock {
    /// Advances the clock and returns the seconds since the previous tick.
    /// The first tick returns `0.0`.
    fn tick(&mut self) -> f32;

    /// Average frames per second
    fn fps(&self) -> f32;
}

/// Measure frame times using the wall clock
#[derive(Debug, Clone)]
pub struct FrameClock {
    init_time: Instant,
    last_time: Option<Instant>,
    delta: Duration,
    delta_seconds: f32,
    elapsed: Duration,
    fps_cache: RingBuffer<f32, 30>,
    last_cached_fps_time: Instant,
    fps: f32,
}

impl Default for FrameClock {
    fn default() -> FrameClock {
        FrameClock {
            init_time: Instant::now(),
            last_time: None,
            delta: Duration::from_secs(0),
            delta_seconds: 0.0,
            elapsed: Duration::from_secs(0),
            fps_cache: Default::default(),
            last_cached_fps_time: Instant::now(),
            fps: 0.0,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta time between frames
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Delta time between frames in seconds
    #[inline]
    pub fn delta_f32(&self) -> f32 {
        self.delta_seconds
    }

    /// Elapsed time since the clock was created
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Last frame time
    #[inline]
    pub fn last_time(&self) -> Option<Instant> {
        self.last_time
    }
}

impl Clock for FrameClock {
    fn tick(&mut self) -> f32 {
        let now = Instant::now();

        if let Some(last_time) = self.last_time {
            self.delta = now - last_time;
            self.delta_seconds = self.delta.as_secs_f32();
        }

        self.last_time = Some(now);
        self.elapsed = now - self.init_time;

        // cache fps each 100ms
        if self.last_cached_fps_time.elapsed().as_secs_f32() > 0.1 && self.delta_seconds > 0.0 {
            self.fps_cache.push(self.delta_seconds);
            self.fps = 1.0 / self.fps_cache.average();
            self.last_cached_fps_time = now;
        }

        self.delta_seconds
    }

    /// Average frames per second (calculated using the last 30 samples)
    #[inline]
    fn fps(&self) -> f32 {
        self.fps
    }
}

/// Deterministic clock advancing a fixed step each tick, used by headless
/// runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    step: f32,
    ticks: u64,
}

impl FixedClock {
    pub fn new(step: f32) -> Result<Self, String> {
        if !step.is_finite() || step < 0.0 {
            return Err(format!("Invalid fixed clock step: {step}"));
        }

        Ok(Self { step, ticks: 0 })
    }

    /// Clock stepping at `fps` frames per second
    pub fn from_fps(fps: f32) -> Result<Self, String> {
        if fps.is_nan() || fps <= 0.0 {
            return Err(format!("Invalid fps: {fps}"));
        }

        Self::new(1.0 / fps)
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Clock for FixedClock {
    fn tick(&mut self) -> f32 {
        self.ticks += 1;
        if self.ticks == 1 { 0.0 } else { self.step }
    }

    fn fps(&self) -> f32 {
        if self.step > 0.0 { 1.0 / self.step } else { 0.0 }
    }
}
