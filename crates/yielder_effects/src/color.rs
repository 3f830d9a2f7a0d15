//! Color model for the particle field.
//!
//! Particles are tinted in HSL space (hue varies, saturation and lightness
//! are fixed) and composited in RGB.

/// RGBA color, components in 0-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Rgba {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Quantizes to 8-bit channels.
    #[must_use]
    pub fn to_u8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Builds a color from 8-bit channels.
    #[must_use]
    pub fn from_u8(channels: [u8; 4]) -> Self {
        let f = |v: u8| f32::from(v) / 255.0;
        Self::new(f(channels[0]), f(channels[1]), f(channels[2]), f(channels[3]))
    }

    /// Source-over compositing of `self` onto `dst`.
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        let a = self.a + dst.a * (1.0 - self.a);
        if a <= 0.0 {
            return Self::TRANSPARENT;
        }
        let mix = |s: f32, d: f32| (s * self.a + d * dst.a * (1.0 - self.a)) / a;
        Self::new(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b), a)
    }

    /// Screen compositing of `self` onto `dst`.
    ///
    /// `1 - (1 - dst) * (1 - src * alpha)` per channel: the result is never
    /// darker than either input.
    #[must_use]
    pub fn screen(self, dst: Self) -> Self {
        let blend = |s: f32, d: f32| 1.0 - (1.0 - d) * (1.0 - s * self.a);
        Self::new(
            blend(self.r, dst.r),
            blend(self.g, dst.g),
            blend(self.b, dst.b),
            self.a + dst.a * (1.0 - self.a),
        )
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// HSLA color: hue in degrees, saturation and lightness in percent,
/// alpha in 0-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    /// Hue angle in degrees.
    pub hue: f32,
    /// Saturation (0-100).
    pub saturation: f32,
    /// Lightness (0-100).
    pub lightness: f32,
    /// Alpha (0-1).
    pub alpha: f32,
}

impl Hsla {
    /// Creates a new HSLA color.
    #[must_use]
    pub const fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    /// Converts to RGBA.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Rgba::new(r + m, g + m, b + m, self.alpha.clamp(0.0, 1.0))
    }

    /// Formats as a CSS `hsla()` value.
    #[must_use]
    pub fn css(self) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_primary_hues() {
        let red = Hsla::new(0.0, 100.0, 50.0, 1.0).to_rgba();
        assert!(close(red.r, 1.0) && close(red.g, 0.0) && close(red.b, 0.0));

        let blue = Hsla::new(240.0, 100.0, 50.0, 1.0).to_rgba();
        assert!(close(blue.r, 0.0) && close(blue.g, 0.0) && close(blue.b, 1.0));
    }

    #[test]
    fn test_particle_violet() {
        // Middle of the particle hue band, 80% / 60%.
        let violet = Hsla::new(250.0, 80.0, 60.0, 0.5).to_rgba();
        assert!(violet.b > violet.r && violet.r > violet.g);
        assert!(close(violet.a, 0.5));
    }

    #[test]
    fn test_screen_never_darkens() {
        let dst = Rgba::new(0.4, 0.2, 0.6, 1.0);
        let src = Rgba::new(0.3, 0.3, 0.3, 0.5);
        let out = src.screen(dst);
        assert!(out.r >= dst.r && out.g >= dst.g && out.b >= dst.b);
    }

    #[test]
    fn test_css() {
        assert_eq!(Hsla::new(220.0, 80.0, 60.0, 0.6).css(), "hsla(220, 80%, 60%, 0.6)");
    }
}
