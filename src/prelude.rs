pub use crate::app::{App, RunStats};
pub use crate::config::SceneConfig;
pub use crate::image_cache::{ImageCache, RotationCache, SharedImageCache};
pub use crate::or_panic::*;
pub use crate::pivot::PivotSolver;
pub use crate::rotator::OscillatingRotator;
pub use crate::scene::Scene;

#[cfg(feature = "logs")]
pub use corelib::app::{LogConfig, init_logs};
pub use corelib::events::{Event, EventQueue, EventSource, FrameBudget};
pub use corelib::gfx::{BlendMode, Canvas, Color, Image};
pub use corelib::limiter::{FpsLimiter, LimitMode};
pub use corelib::math::*;
pub use corelib::time::{Clock, FixedClock, FrameClock};
