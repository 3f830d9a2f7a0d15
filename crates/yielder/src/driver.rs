//! Headless driver.
//!
//! Runs the particle field against an off-screen [`PixelCanvas`], playing the
//! role of the browser: it moves the pointer along a circle and fires the
//! refresh signal once per frame.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use yielder_effects::{FieldConfig, FieldStats, HeadlessHost, ParticleAnimator};
use yielder_storage::{ConnectionError, WalletKind, WalletProvider};

use crate::config::HeadlessConfig;

/// Outcome of a headless run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames actually ticked.
    pub frames: u32,
    /// Largest pool size observed after a tick.
    pub peak_particles: usize,
    /// Field counters at the end of the run.
    pub stats: FieldStats,
    /// Lit pixels in the final frame.
    pub lit_pixels: usize,
}

/// Builds the particle RNG: fixed seed when configured, entropy otherwise.
#[must_use]
pub fn field_rng(config: &FieldConfig) -> ChaCha8Rng {
    match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Runs the particle field off-screen for `headless.frames` frames.
#[must_use]
pub fn run_headless(field: &FieldConfig, headless: &HeadlessConfig) -> RunSummary {
    let viewport = headless.viewport();
    let mut host = HeadlessHost::new(viewport);

    let Some(mut animator) = ParticleAnimator::activate(&mut host, field.clone(), field_rng(field))
    else {
        return RunSummary::default();
    };

    let (cx, cy) = (viewport.width as f32 / 2.0, viewport.height as f32 / 2.0);
    let mut summary = RunSummary::default();

    for frame in 0..headless.frames {
        let angle = frame as f32 * headless.pointer_speed;
        host.move_pointer(
            cx + headless.pointer_radius * angle.cos(),
            cy + headless.pointer_radius * angle.sin(),
        );

        let Some(request) = host.take_due_frame() else {
            break;
        };
        if animator.on_frame(&mut host, request) {
            summary.frames += 1;
            summary.peak_particles = summary.peak_particles.max(animator.field().len());
        }
    }

    summary.lit_pixels = animator.surface().lit_pixels();
    animator.deactivate(&mut host);
    summary.stats = animator.stats();

    tracing::info!(
        frames = summary.frames,
        peak = summary.peak_particles,
        spawned = summary.stats.spawned_total,
        expired = summary.stats.expired_total,
        evicted = summary.stats.evicted_total,
        "headless run complete"
    );
    summary
}

/// Wallet provider that hands out a fixed address.
///
/// Without an address it behaves like a wallet that is not installed.
#[derive(Debug, Clone, Default)]
pub struct DemoWalletProvider {
    address: Option<String>,
}

impl DemoWalletProvider {
    /// Creates a provider returning `address`.
    #[must_use]
    pub fn new(address: Option<String>) -> Self {
        Self { address }
    }
}

impl WalletProvider for DemoWalletProvider {
    async fn connect(&self, kind: WalletKind) -> Result<String, ConnectionError> {
        self.address
            .clone()
            .ok_or(ConnectionError::NotInstalled(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> FieldConfig {
        FieldConfig {
            seed: Some(42),
            ..FieldConfig::default()
        }
    }

    #[test]
    fn test_run_is_deterministic_with_seed() {
        let headless = HeadlessConfig {
            width: 200,
            height: 200,
            frames: 90,
            pointer_radius: 50.0,
            ..HeadlessConfig::default()
        };

        let a = run_headless(&seeded(), &headless);
        let b = run_headless(&seeded(), &headless);
        assert_eq!(a, b);
        assert_eq!(a.frames, 90);
        assert_eq!(a.stats.spawned_total, 180);
        assert!(a.peak_particles <= 100);
        assert!(a.lit_pixels > 0);
    }

    #[test]
    fn test_zero_frames() {
        let headless = HeadlessConfig {
            frames: 0,
            ..HeadlessConfig::default()
        };
        let summary = run_headless(&seeded(), &headless);
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.lit_pixels, 0);
    }
}
