use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scene setup. Every field has a default so a config file only needs the
/// values it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub title: String,
    pub size: [u32; 2],
    pub background: [u8; 3],
    /// Target frames per second, 0 disables the limiter
    pub fps: u32,
    pub lights: u32,
    /// Seconds per full swing
    pub period: f64,
    /// Full sweep in degrees
    pub arc: u32,
    /// How far below the bottom edge the pivots are placed
    pub y_offset: f32,
    /// Phase offsets, as a fraction of `period`, for odd and even lights
    pub phase_odd: f64,
    pub phase_even: f64,
    /// PNG used for the beam, a procedural one is generated when missing
    pub image: Option<PathBuf>,
    pub beam_size: [u32; 2],
    pub beam_color: [u8; 4],
    /// Stop after this many frames
    pub frames: Option<u64>,
    /// Step the animation with a fixed delta instead of the wall clock
    pub fixed_step: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "Spotlight Prototype".to_string(),
            size: [1000, 500],
            background: [5, 5, 15],
            fps: 60,
            lights: 4,
            period: 4.0,
            arc: 140,
            y_offset: 20.0,
            phase_odd: 1.0,
            phase_even: 0.5,
            image: None,
            beam_size: [120, 440],
            beam_color: [255, 250, 215, 200],
            frames: Some(600),
            fixed_step: false,
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config '{}': {e}", path.display()))?;
        let config = Self::from_json_str(&json)
            .map_err(|e| format!("Invalid config '{}': {e}", path.display()))?;

        log::debug!("Loaded config from '{}'", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }

    /// Checks the values that would make the scene meaningless
    pub fn validate(&self) -> Result<(), String> {
        if self.size[0] == 0 || self.size[1] == 0 {
            return Err(format!("Invalid screen size: {:?}", self.size));
        }

        if !self.period.is_finite() || self.period <= 0.0 {
            return Err(format!("Period must be > 0, got {}", self.period));
        }

        if !self.phase_odd.is_finite() || !self.phase_even.is_finite() {
            return Err("Phase offsets must be finite".to_string());
        }

        if !self.y_offset.is_finite() {
            return Err("y_offset must be finite".to_string());
        }

        if self.image.is_none() && (self.beam_size[0] == 0 || self.beam_size[1] == 0) {
            return Err(format!("Invalid beam size: {:?}", self.beam_size));
        }

        Ok(())
    }

    /// Set the title shown in the fps logs
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Set the screen size
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = [width, height];
        self
    }

    pub fn background(mut self, r: u8, g: u8, b: u8) -> Self {
        self.background = [r, g, b];
        self
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn lights(mut self, lights: u32) -> Self {
        self.lights = lights;
        self
    }

    pub fn period(mut self, period: f64) -> Self {
        self.period = period;
        self
    }

    pub fn arc(mut self, arc: u32) -> Self {
        self.arc = arc;
        self
    }

    pub fn image<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.image = Some(path.into());
        self
    }

    pub fn beam_size(mut self, width: u32, height: u32) -> Self {
        self.beam_size = [width, height];
        self
    }

    /// Run forever with `None`
    pub fn frames(mut self, frames: Option<u64>) -> Self {
        self.frames = frames;
        self
    }

    pub fn fixed_step(mut self, enabled: bool) -> Self {
        self.fixed_step = enabled;
        self
    }
}
