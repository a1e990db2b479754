pub mod app;
pub mod config;
pub mod image_cache;
pub mod or_panic;
pub mod pivot;
pub mod prelude;
pub mod rotator;
pub mod scene;

#[doc(inline)]
pub use corelib::{events, gfx, limiter, math, time};
