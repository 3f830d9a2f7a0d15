//! Host environment for the animator.
//!
//! ## Model
//!
//! ```text
//! ┌──────────────┐  HostEvent (channel)   ┌──────────────────┐
//! │  FrameHost   │ ─────────────────────► │ ParticleAnimator │
//! │              │                        │                  │
//! │  refresh     │ ── FrameRequest due ─► │  on_frame()      │
//! │  signal      │ ◄── request_frame() ── │                  │
//! └──────────────┘                        └──────────────────┘
//! ```
//!
//! Everything runs on one thread. Listeners receive events through a
//! `crossbeam-channel` receiver and the animator drains it between ticks.
//! A frame request is a one-shot registration: the host reports it due once,
//! and the animator registers the next one after finishing its tick.

use std::collections::VecDeque;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::canvas::{DrawSurface, PixelCanvas, Viewport};

/// Input events delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The viewport changed size.
    Resize(Viewport),
    /// The pointer moved to screen coordinates.
    PointerMove {
        /// Pointer X.
        x: f32,
        /// Pointer Y.
        y: f32,
    },
}

/// Handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Handle for a pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// A listener registration and its event stream.
#[derive(Debug)]
pub struct Subscription {
    /// Registration handle, used to unsubscribe.
    pub id: ListenerId,
    /// Events in dispatch order.
    pub events: Receiver<HostEvent>,
}

/// The environment an animator runs in.
pub trait FrameHost {
    /// Drawing surface type provided by this host.
    type Surface: DrawSurface;

    /// Acquires the drawing surface. `None` means the environment cannot
    /// draw at all.
    fn acquire_surface(&mut self) -> Option<Self::Surface>;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Registers a listener for resize and pointer-move events.
    fn subscribe(&mut self) -> Subscription;

    /// Removes a listener. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: ListenerId);

    /// Registers a callback for the next refresh.
    fn request_frame(&mut self) -> FrameRequest;

    /// Cancels a pending callback. Unknown or already-run requests are
    /// ignored.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// In-process host with a manually pumped refresh signal.
pub struct HeadlessHost<S = PixelCanvas> {
    viewport: Viewport,
    surface_factory: Option<fn(Viewport) -> S>,
    listeners: Vec<(ListenerId, Sender<HostEvent>)>,
    next_listener: u64,
    frames: VecDeque<FrameRequest>,
    next_frame: u64,
}

impl HeadlessHost<PixelCanvas> {
    /// Creates a host that hands out software canvases.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self::with_surface(viewport, PixelCanvas::new)
    }
}

impl<S: DrawSurface> HeadlessHost<S> {
    /// Creates a host whose surfaces are built by `factory`.
    #[must_use]
    pub fn with_surface(viewport: Viewport, factory: fn(Viewport) -> S) -> Self {
        Self {
            surface_factory: Some(factory),
            ..Self::without_surface(viewport)
        }
    }

    /// Creates a host that cannot provide a drawing surface.
    #[must_use]
    pub fn without_surface(viewport: Viewport) -> Self {
        Self {
            viewport,
            surface_factory: None,
            listeners: Vec::new(),
            next_listener: 1,
            frames: VecDeque::new(),
            next_frame: 1,
        }
    }

    /// Sends an event to every listener, pruning dropped ones.
    pub fn dispatch(&mut self, event: HostEvent) {
        self.listeners.retain(|(_, tx)| tx.send(event).is_ok());
    }

    /// Changes the viewport and notifies listeners.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.dispatch(HostEvent::Resize(viewport));
    }

    /// Notifies listeners of a pointer move.
    pub fn move_pointer(&mut self, x: f32, y: f32) {
        self.dispatch(HostEvent::PointerMove { x, y });
    }

    /// Pops the oldest pending frame request, as the refresh signal would.
    pub fn take_due_frame(&mut self) -> Option<FrameRequest> {
        self.frames.pop_front()
    }

    /// Number of pending frame requests.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<S: DrawSurface> FrameHost for HeadlessHost<S> {
    type Surface = S;

    fn acquire_surface(&mut self) -> Option<S> {
        self.surface_factory.map(|factory| factory(self.viewport))
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn subscribe(&mut self) -> Subscription {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        let (tx, rx) = unbounded();
        self.listeners.push((id, tx));
        Subscription { id, events: rx }
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener, _)| *listener != id);
    }

    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_frame);
        self.next_frame += 1;
        self.frames.push_back(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.frames.retain(|pending| *pending != request);
    }
}
