//! The live particle pool.
//!
//! ## Per-tick order
//!
//! ```text
//! for each particle (insertion order):
//!     advance → fade/shrink → draw core + glow
//! retain(age < lifespan)          // survivors keep their order
//! drop oldest until len ≤ capacity
//! ```
//!
//! The pool is a plain `Vec` in creation order. Eviction always removes
//! from the front, so the newest particles are the ones that survive.

use rand::Rng;

use crate::canvas::{Circle, DrawSurface};
use crate::config::FieldConfig;
use crate::particle::Particle;

/// Counters for the particle field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldStats {
    /// Currently alive particles.
    pub alive: usize,
    /// Particles ever spawned.
    pub spawned_total: u64,
    /// Particles removed because their lifespan ran out.
    pub expired_total: u64,
    /// Particles removed by capacity eviction.
    pub evicted_total: u64,
    /// Ticks processed.
    pub ticks: u64,
}

/// Bounded, ordered pool of live particles.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    stats: FieldStats,
}

impl ParticleField {
    /// Creates an empty field.
    #[must_use]
    pub fn new(config: FieldConfig) -> Self {
        Self {
            particles: Vec::with_capacity(config.capacity + config.burst),
            config,
            stats: FieldStats::default(),
        }
    }

    /// Field configuration.
    #[must_use]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Live particles, oldest first.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True if no particles are alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> FieldStats {
        FieldStats {
            alive: self.particles.len(),
            ..self.stats
        }
    }

    /// Emits one burst at `(x, y)`.
    ///
    /// Evicts the oldest particles if the burst pushes the pool past
    /// capacity.
    pub fn emit<R: Rng + ?Sized>(&mut self, x: f32, y: f32, rng: &mut R) {
        for _ in 0..self.config.burst {
            self.particles.push(Particle::spawn(x, y, &self.config, rng));
        }
        self.stats.spawned_total += self.config.burst as u64;
        self.enforce_capacity();
    }

    /// Inserts a prepared particle (oldest-first order is preserved).
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
        self.stats.spawned_total += 1;
        self.enforce_capacity();
    }

    /// Runs one tick, drawing every particle into `surface`.
    ///
    /// Returns the number of particles removed this tick (expired plus
    /// evicted).
    pub fn step<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let config = &self.config;

        for particle in &mut self.particles {
            particle.advance(config.gravity, config.friction);

            let opacity = particle.opacity();
            let radius = particle.drawn_radius(config.shrink);

            surface.fill_circle(&Circle {
                x: particle.x,
                y: particle.y,
                radius,
                color: particle.color(config, opacity * config.core_alpha),
            });
            surface.fill_circle(&Circle {
                x: particle.x,
                y: particle.y,
                radius: radius * config.glow_scale,
                color: particle.color(config, opacity * config.glow_alpha),
            });
        }

        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired());
        let expired = before - self.particles.len();
        self.stats.expired_total += expired as u64;

        let evicted = self.enforce_capacity();
        self.stats.ticks += 1;

        expired + evicted
    }

    /// Removes every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    fn enforce_capacity(&mut self) -> usize {
        let excess = self.particles.len().saturating_sub(self.config.capacity);
        if excess > 0 {
            self.particles.drain(..excess);
            self.stats.evicted_total += excess as u64;
        }
        excess
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(FieldConfig::default())
    }
}
