//! # Yielder Effects
//!
//! The cursor particle field behind the dashboard's landing page.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                  PARTICLE PIPELINE                      │
//! ├────────────────────────────────────────────────────────┤
//! │  HostEvent → Animator → ParticleField → DrawSurface     │
//! │      ↓           ↓             ↓              ↓         │
//! │  pointer/    frame req.    advance +     circles,       │
//! │  resize      per refresh   fade/evict    screen blend   │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! The pool holds at most `capacity` particles (100 by default); every
//! pointer move emits a burst of 2, and each tick ages, moves, draws and
//! expires them.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod animator;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod host;
pub mod particle;

pub use animator::ParticleAnimator;
pub use canvas::{BlendMode, Circle, CommandRecorder, DrawSurface, Pixel, PixelCanvas, RenderCommand, Viewport};
pub use color::{Hsla, Rgba};
pub use config::FieldConfig;
pub use error::{EffectsError, EffectsResult};
pub use field::{FieldStats, ParticleField};
pub use host::{FrameHost, FrameRequest, HeadlessHost, HostEvent, ListenerId, Subscription};
pub use particle::Particle;
