//! A single cursor particle.
//!
//! Particles live in screen space and are advanced once per tick. Time is
//! measured in ticks, not seconds: the host's refresh signal drives the loop.

use rand::Rng;

use crate::color::Hsla;
use crate::config::FieldConfig;

/// One live particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Screen X position.
    pub x: f32,
    /// Screen Y position.
    pub y: f32,
    /// Horizontal velocity (px/tick).
    pub vx: f32,
    /// Vertical velocity (px/tick).
    pub vy: f32,
    /// Ticks survived so far.
    pub age: u32,
    /// Tick count at which the particle is removed.
    pub lifespan: u32,
    /// Base radius in pixels.
    pub radius: f32,
    /// Hue angle in degrees.
    pub hue: f32,
}

impl Particle {
    /// Spawns a particle at `(x, y)` with properties drawn from `config`.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(x: f32, y: f32, config: &FieldConfig, rng: &mut R) -> Self {
        let spread = config.velocity_spread;
        Self {
            x,
            y,
            vx: rng.gen_range(-spread..=spread),
            vy: rng.gen_range(-spread..=spread),
            age: 0,
            lifespan: rng.gen_range(config.lifespan[0]..=config.lifespan[1]),
            radius: rng.gen_range(config.radius[0]..=config.radius[1]),
            hue: rng.gen_range(config.hue[0]..=config.hue[1]),
        }
    }

    /// Advances one tick: ages, integrates position, then applies gravity
    /// to `vy` and friction to `vx`.
    #[inline]
    pub fn advance(&mut self, gravity: f32, friction: f32) {
        self.age += 1;
        self.x += self.vx;
        self.y += self.vy;
        self.vy += gravity;
        self.vx *= friction;
    }

    /// Fraction of life consumed (0 at birth, 1 at expiry).
    #[inline]
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.age as f32 / self.lifespan as f32
    }

    /// Opacity multiplier, fading linearly to zero.
    #[inline]
    #[must_use]
    pub fn opacity(&self) -> f32 {
        1.0 - self.progress()
    }

    /// Radius to draw, shrinking by `shrink` of the base radius over life.
    #[inline]
    #[must_use]
    pub fn drawn_radius(&self, shrink: f32) -> f32 {
        self.radius * (1.0 - self.progress() * shrink)
    }

    /// True once age has reached lifespan.
    #[inline]
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.age >= self.lifespan
    }

    /// Particle tint at the given alpha.
    #[inline]
    #[must_use]
    pub fn color(&self, config: &FieldConfig, alpha: f32) -> Hsla {
        Hsla::new(self.hue, config.saturation, config.lightness, alpha)
    }
}
