//! Particle field configuration.
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file (or no file) yields the stock cursor trail.
//!
//! ```toml
//! capacity = 100
//! burst = 2
//! lifespan = [40, 60]
//! hue = [220.0, 280.0]
//! seed = 7
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{EffectsError, EffectsResult};

/// Tunables for particle spawning, simulation and drawing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Maximum live particles; the oldest surplus is evicted.
    pub capacity: usize,
    /// Particles emitted per pointer move.
    pub burst: usize,
    /// Initial velocity per axis is drawn from `[-spread, spread]` px/tick.
    pub velocity_spread: f32,
    /// Lifespan range in ticks, inclusive.
    pub lifespan: [u32; 2],
    /// Radius range in pixels.
    pub radius: [f32; 2],
    /// Hue range in degrees.
    pub hue: [f32; 2],
    /// Downward acceleration added to `vy` each tick (px/tick²).
    pub gravity: f32,
    /// Multiplicative damping applied to `vx` each tick.
    pub friction: f32,
    /// HSL saturation in percent.
    pub saturation: f32,
    /// HSL lightness in percent.
    pub lightness: f32,
    /// Alpha multiplier for the inner circle.
    pub core_alpha: f32,
    /// Alpha multiplier for the glow circle.
    pub glow_alpha: f32,
    /// Glow radius as a multiple of the drawn radius.
    pub glow_scale: f32,
    /// Fraction of the radius lost by the end of life.
    pub shrink: f32,
    /// Fixed RNG seed; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            burst: 2,
            velocity_spread: 1.0,
            lifespan: [40, 60],
            radius: [2.0, 5.0],
            hue: [220.0, 280.0],
            gravity: 0.02,
            friction: 0.99,
            saturation: 80.0,
            lightness: 60.0,
            core_alpha: 0.6,
            glow_alpha: 0.2,
            glow_scale: 2.0,
            shrink: 0.5,
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Parses a config from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`EffectsError::ConfigParse`] on malformed TOML and
    /// [`EffectsError::InvalidConfig`] if validation fails.
    pub fn from_toml_str(text: &str) -> EffectsResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| EffectsError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`EffectsError::ConfigRead`] if the file cannot be read, plus
    /// anything [`FieldConfig::from_toml_str`] returns.
    pub fn from_toml_file(path: impl AsRef<Path>) -> EffectsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EffectsError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks ranges and invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EffectsError::InvalidConfig`] naming the first offending
    /// field.
    pub fn validate(&self) -> EffectsResult<()> {
        let invalid = |msg: &str| Err(EffectsError::InvalidConfig(msg.to_string()));

        let floats = [
            ("velocity_spread", self.velocity_spread),
            ("radius", self.radius[0]),
            ("radius", self.radius[1]),
            ("hue", self.hue[0]),
            ("hue", self.hue[1]),
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("saturation", self.saturation),
            ("lightness", self.lightness),
            ("core_alpha", self.core_alpha),
            ("glow_alpha", self.glow_alpha),
            ("glow_scale", self.glow_scale),
            ("shrink", self.shrink),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EffectsError::InvalidConfig(format!("{name} must be finite")));
        }

        if self.capacity == 0 {
            return invalid("capacity must be at least 1");
        }
        if self.burst == 0 {
            return invalid("burst must be at least 1");
        }
        if self.lifespan[0] == 0 || self.lifespan[0] > self.lifespan[1] {
            return invalid("lifespan must be a non-empty range starting above 0");
        }
        if !(self.radius[0] > 0.0 && self.radius[0] <= self.radius[1]) {
            return invalid("radius must be a positive, ordered range");
        }
        if self.hue[0] > self.hue[1] {
            return invalid("hue range is inverted");
        }
        if self.velocity_spread < 0.0 {
            return invalid("velocity_spread must not be negative");
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return invalid("friction must be in (0, 1]");
        }
        if !(0.0..=1.0).contains(&self.core_alpha) || !(0.0..=1.0).contains(&self.glow_alpha) {
            return invalid("alpha multipliers must be in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.shrink) {
            return invalid("shrink must be in [0, 1]");
        }
        if self.glow_scale < 1.0 {
            return invalid("glow_scale must be at least 1");
        }
        Ok(())
    }
}
