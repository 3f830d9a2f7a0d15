//! Cursor particle animator.
//!
//! Ties a [`ParticleField`] to a [`FrameHost`]: pointer moves emit bursts,
//! each refresh runs one tick, and deactivation tears everything down.
//!
//! ## Lifecycle
//!
//! ```text
//! activate ──► [surface? no] ──► None (nothing registered)
//!    │ yes
//!    ▼
//! resize surface, screen blend, subscribe, request frame
//!    │
//!    ▼
//! on_frame: drain events → clear → step field → request next frame
//!    │  (repeats, never overlapping)
//!    ▼
//! deactivate: unsubscribe, cancel pending frame
//! ```

use rand::Rng;

use crate::canvas::{BlendMode, DrawSurface};
use crate::config::FieldConfig;
use crate::field::{FieldStats, ParticleField};
use crate::host::{FrameHost, FrameRequest, HostEvent, Subscription};

/// Particle field bound to a host's events and refresh signal.
pub struct ParticleAnimator<H: FrameHost, R> {
    field: ParticleField,
    surface: H::Surface,
    rng: R,
    subscription: Option<Subscription>,
    pending: Option<FrameRequest>,
    pointer: Option<(f32, f32)>,
}

impl<H: FrameHost, R: Rng> ParticleAnimator<H, R> {
    /// Activates the animator on `host`.
    ///
    /// Returns `None` without registering anything if the host cannot
    /// provide a drawing surface.
    pub fn activate(host: &mut H, config: FieldConfig, rng: R) -> Option<Self> {
        let Some(mut surface) = host.acquire_surface() else {
            tracing::debug!("no drawing surface available, particle field disabled");
            return None;
        };

        surface.resize(host.viewport());
        surface.set_blend_mode(BlendMode::Screen);

        let subscription = host.subscribe();
        let pending = host.request_frame();
        tracing::debug!(
            listener = subscription.id.0,
            frame = pending.0,
            "particle field activated"
        );

        Some(Self {
            field: ParticleField::new(config),
            surface,
            rng,
            subscription: Some(subscription),
            pending: Some(pending),
            pointer: None,
        })
    }

    /// Applies every queued host event in dispatch order.
    ///
    /// Returns the number of events applied.
    pub fn drain_events(&mut self) -> usize {
        let Some(subscription) = &self.subscription else {
            return 0;
        };

        let mut applied = 0;
        for event in subscription.events.try_iter() {
            match event {
                HostEvent::Resize(viewport) => self.surface.resize(viewport),
                HostEvent::PointerMove { x, y } => {
                    self.pointer = Some((x, y));
                    self.field.emit(x, y, &mut self.rng);
                }
            }
            applied += 1;
        }
        applied
    }

    /// Runs one tick in response to `request` becoming due.
    ///
    /// Stale or foreign requests are ignored. Returns `true` if a tick ran.
    pub fn on_frame(&mut self, host: &mut H, request: FrameRequest) -> bool {
        if self.pending != Some(request) {
            return false;
        }
        self.pending = None;

        self.drain_events();
        self.surface.clear();
        self.field.step(&mut self.surface);

        self.pending = Some(host.request_frame());
        true
    }

    /// Removes listeners and cancels the pending frame.
    ///
    /// Safe to call more than once.
    pub fn deactivate(&mut self, host: &mut H) {
        if let Some(subscription) = self.subscription.take() {
            host.unsubscribe(subscription.id);
        }
        if let Some(request) = self.pending.take() {
            host.cancel_frame(request);
        }
        tracing::debug!(stats = ?self.field.stats(), "particle field deactivated");
    }

    /// True between activation and deactivation.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// The particle pool.
    #[must_use]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// The drawing surface.
    #[must_use]
    pub fn surface(&self) -> &H::Surface {
        &self.surface
    }

    /// Last known pointer position.
    #[must_use]
    pub fn pointer(&self) -> Option<(f32, f32)> {
        self.pointer
    }

    /// Pending frame request, if any.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Field counters.
    #[must_use]
    pub fn stats(&self) -> FieldStats {
        self.field.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CommandRecorder, RenderCommand, Viewport};
    use crate::host::HeadlessHost;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    type Host = HeadlessHost<CommandRecorder>;

    fn host() -> Host {
        HeadlessHost::with_surface(Viewport::new(640, 480), CommandRecorder::new)
    }

    fn activate(host: &mut Host) -> ParticleAnimator<Host, ChaCha8Rng> {
        ParticleAnimator::activate(host, FieldConfig::default(), ChaCha8Rng::seed_from_u64(11))
            .expect("surface available")
    }

    fn pump(host: &mut Host, animator: &mut ParticleAnimator<Host, ChaCha8Rng>) -> bool {
        match host.take_due_frame() {
            Some(request) => animator.on_frame(host, request),
            None => false,
        }
    }

    #[test]
    fn test_activation_registers_listener_and_frame() {
        let mut host = host();
        let animator = activate(&mut host);

        assert!(animator.is_active());
        assert_eq!(host.listener_count(), 1);
        assert_eq!(host.pending_frames(), 1);
        assert_eq!(
            animator.surface().commands(),
            &[
                RenderCommand::Resize(Viewport::new(640, 480)),
                RenderCommand::SetBlend(BlendMode::Screen),
            ]
        );
    }

    #[test]
    fn test_no_surface_is_silent_noop() {
        let mut host: Host = HeadlessHost::without_surface(Viewport::new(640, 480));
        let animator = ParticleAnimator::activate(
            &mut host,
            FieldConfig::default(),
            ChaCha8Rng::seed_from_u64(1),
        );

        assert!(animator.is_none());
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn test_pointer_moves_applied_before_tick() {
        let mut host = host();
        let mut animator = activate(&mut host);

        host.move_pointer(10.0, 20.0);
        host.move_pointer(30.0, 40.0);
        assert!(animator.field().is_empty());

        assert!(pump(&mut host, &mut animator));
        assert_eq!(animator.field().len(), 4);
        assert_eq!(animator.pointer(), Some((30.0, 40.0)));
        assert!(animator.field().particles().iter().all(|p| p.age == 1));
        assert_eq!(animator.surface().circles_since_clear().len(), 8);
    }

    #[test]
    fn test_resize_leaves_particles_alone() {
        let mut host = host();
        let mut animator = activate(&mut host);
        host.move_pointer(5.0, 5.0);
        pump(&mut host, &mut animator);

        host.resize(Viewport::new(100, 50));
        animator.drain_events();

        assert_eq!(animator.surface().viewport(), Viewport::new(100, 50));
        assert_eq!(animator.field().len(), 2);
    }

    #[test]
    fn test_each_tick_schedules_exactly_one_more() {
        let mut host = host();
        let mut animator = activate(&mut host);

        for _ in 0..10 {
            assert!(pump(&mut host, &mut animator));
            assert_eq!(host.pending_frames(), 1);
        }
        assert_eq!(animator.stats().ticks, 10);
    }

    #[test]
    fn test_stale_request_ignored() {
        let mut host = host();
        let mut animator = activate(&mut host);
        let Some(request) = host.take_due_frame() else {
            panic!("first frame should be pending");
        };

        assert!(animator.on_frame(&mut host, request));
        assert!(!animator.on_frame(&mut host, request));
        assert_eq!(animator.stats().ticks, 1);
    }

    #[test]
    fn test_deactivate_tears_down() {
        let mut host = host();
        let mut animator = activate(&mut host);
        pump(&mut host, &mut animator);

        animator.deactivate(&mut host);
        assert!(!animator.is_active());
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.pending_frames(), 0);
        assert!(!pump(&mut host, &mut animator));

        animator.deactivate(&mut host);
        assert_eq!(animator.drain_events(), 0);
    }
}
