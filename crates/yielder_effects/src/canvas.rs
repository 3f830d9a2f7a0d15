//! Drawing surfaces.
//!
//! The animator only ever clears, resizes, switches blend mode, and fills
//! circles, so that is the whole surface contract. Two surfaces ship here:
//!
//! - [`PixelCanvas`]: software RGBA8 rasterizer, used headless
//! - [`CommandRecorder`]: records the command stream for inspection

use bytemuck::{Pod, Zeroable};

use crate::color::{Hsla, Rgba};

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count.
    #[must_use]
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// How new drawing combines with existing pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha compositing.
    #[default]
    SourceOver,
    /// Screen blending: overlaps brighten instead of occluding.
    Screen,
}

/// A filled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center X.
    pub x: f32,
    /// Center Y.
    pub y: f32,
    /// Radius in pixels.
    pub radius: f32,
    /// Fill color.
    pub color: Hsla,
}

/// A recorded drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Surface resized (contents discarded).
    Resize(Viewport),
    /// Surface cleared to transparent.
    Clear,
    /// Blend mode switched.
    SetBlend(BlendMode),
    /// Circle filled.
    Circle(Circle),
}

/// Anything the particle field can draw into.
pub trait DrawSurface {
    /// Resets the pixel dimensions. Contents are discarded.
    fn resize(&mut self, viewport: Viewport);

    /// Current pixel dimensions.
    fn viewport(&self) -> Viewport;

    /// Clears every pixel to transparent.
    fn clear(&mut self);

    /// Sets the compositing mode for subsequent fills.
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Fills a circle.
    fn fill_circle(&mut self, circle: &Circle);
}

/// 8-bit RGBA pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Pixel {
    fn to_rgba(self) -> Rgba {
        Rgba::from_u8([self.r, self.g, self.b, self.a])
    }

    fn from_rgba(color: Rgba) -> Self {
        let [r, g, b, a] = color.to_u8();
        Self { r, g, b, a }
    }
}

/// Software canvas with an RGBA8 pixel buffer.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    viewport: Viewport,
    pixels: Vec<Pixel>,
    blend: BlendMode,
}

impl PixelCanvas {
    /// Creates a cleared canvas.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pixels: vec![Pixel::default(); viewport.area()],
            blend: BlendMode::SourceOver,
        }
    }

    /// Returns the pixel at `(x, y)`, if inside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.viewport.width || y >= self.viewport.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.viewport.width as usize + x as usize)
            .copied()
    }

    /// All pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pixel buffer as raw RGBA bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Number of pixels with non-zero alpha.
    #[must_use]
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.a > 0).count()
    }

    /// Current blend mode.
    #[must_use]
    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }
}

impl DrawSurface for PixelCanvas {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.pixels.clear();
        self.pixels.resize(viewport.area(), Pixel::default());
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        self.pixels.fill(Pixel::default());
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn fill_circle(&mut self, circle: &Circle) {
        let src = circle.color.to_rgba();
        if circle.radius <= 0.0 || src.a <= 0.0 || self.pixels.is_empty() {
            return;
        }

        let width = self.viewport.width as f32;
        let height = self.viewport.height as f32;
        let x0 = (circle.x - circle.radius).floor().clamp(0.0, width) as usize;
        let x1 = (circle.x + circle.radius).ceil().clamp(0.0, width) as usize;
        let y0 = (circle.y - circle.radius).floor().clamp(0.0, height) as usize;
        let y1 = (circle.y + circle.radius).ceil().clamp(0.0, height) as usize;
        let r2 = circle.radius * circle.radius;
        let stride = self.viewport.width as usize;

        for py in y0..y1 {
            let dy = py as f32 + 0.5 - circle.y;
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - circle.x;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let slot = &mut self.pixels[py * stride + px];
                let dst = slot.to_rgba();
                let out = match self.blend {
                    BlendMode::SourceOver => src.over(dst),
                    BlendMode::Screen => src.screen(dst),
                };
                *slot = Pixel::from_rgba(out);
            }
        }
    }
}

/// Surface that records commands instead of drawing.
///
/// Commands accumulate until [`CommandRecorder::take`] is called.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    viewport: Viewport,
    commands: Vec<RenderCommand>,
}

impl CommandRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::with_capacity(256),
        }
    }

    /// Commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Takes all recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Circles recorded since the last clear.
    #[must_use]
    pub fn circles_since_clear(&self) -> Vec<Circle> {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, RenderCommand::Clear))
            .map_or(0, |i| i + 1);
        self.commands[start..]
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Circle(circle) => Some(*circle),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for CommandRecorder {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.commands.push(RenderCommand::Resize(viewport));
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        self.commands.push(RenderCommand::Clear);
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.commands.push(RenderCommand::SetBlend(mode));
    }

    fn fill_circle(&mut self, circle: &Circle) {
        self.commands.push(RenderCommand::Circle(*circle));
    }
}
