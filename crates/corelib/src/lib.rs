pub mod app;
pub mod events;
pub mod gfx;
pub mod limiter;
pub mod math;
pub mod time;
