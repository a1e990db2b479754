use spin_sleep_util::Interval;
use std::time::Duration;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitMode {
    Target(Duration),
    #[default]
    Disabled,
}

impl LimitMode {
    /// Target mode for the given frames per second, `Disabled` if `fps` is 0
    #[inline]
    pub fn from_fps(fps: u32) -> Self {
        if fps == 0 {
            return LimitMode::Disabled;
        }

        LimitMode::Target(Duration::from_secs(1) / fps)
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, LimitMode::Disabled)
    }
}

/// Sleeps at the end of each frame to keep a steady frame rate
pub struct FpsLimiter {
    mode: LimitMode,
    interval: Option<Interval>,
}

impl FpsLimiter {
    pub fn new(mode: LimitMode) -> Self {
        let interval = match mode {
            LimitMode::Target(dt) if dt > Duration::ZERO => {
                log::debug!("FPSLimiter enabled with mode={mode:?}");
                Some(spin_sleep_util::interval(dt))
            }
            _ => None,
        };

        FpsLimiter { mode, interval }
    }

    #[inline]
    pub fn mode(&self) -> LimitMode {
        self.mode
    }

    #[inline(always)]
    pub fn tick(&mut self) {
        if let Some(interval) = &mut self.interval {
            interval.tick();
        }
    }
}
