//! Numeric colors for streaks and backdrop paints.
//!
//! Colors stay numeric all the way to the surface. CSS strings are only
//! produced by [`Color::to_css`] when a canvas needs them, and pixel surfaces
//! use [`Color::to_rgba`] instead.

use glam::Vec3;
use rand::Rng;

/// A color in HSL space with straight alpha.
///
/// `hue` is in degrees, `saturation` and `lightness` in percent (0-100),
/// `alpha` in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    /// Opaque color from hue, saturation and lightness.
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha: 1.0,
        }
    }

    /// Same hue and saturation at a different lightness.
    #[inline]
    pub fn with_lightness(self, lightness: f32) -> Self {
        Self { lightness, ..self }
    }

    /// Same color at a different alpha, clamped to `0.0..=1.0`.
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS `hsla()` notation.
    pub fn to_css(&self) -> String {
        format!(
            "hsla({:.1}, {}%, {}%, {:.3})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }

    /// Convert to 8-bit RGB, keeping alpha.
    pub fn to_rgba(&self) -> Rgba {
        let rgb = hsl_to_rgb(
            self.hue,
            self.saturation / 100.0,
            self.lightness / 100.0,
        );
        Rgba {
            r: unit_to_u8(rgb.x),
            g: unit_to_u8(rgb.y),
            b: unit_to_u8(rgb.z),
            alpha: self.alpha,
        }
    }
}

/// An 8-bit RGB color with straight alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self { r, g, b, alpha }
    }

    /// CSS `rgba()` notation.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
    }

    /// Channels as floats in `0.0..=1.0`, alpha last.
    pub fn to_unit(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.alpha.clamp(0.0, 1.0),
        ]
    }
}

/// Any paint a [`Surface`](crate::surface::Surface) accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Hsla(Hsla),
    Rgba(Rgba),
}

impl Color {
    pub fn to_css(&self) -> String {
        match self {
            Color::Hsla(c) => c.to_css(),
            Color::Rgba(c) => c.to_css(),
        }
    }

    pub fn to_rgba(&self) -> Rgba {
        match self {
            Color::Hsla(c) => c.to_rgba(),
            Color::Rgba(c) => *c,
        }
    }

    pub fn alpha(&self) -> f32 {
        match self {
            Color::Hsla(c) => c.alpha,
            Color::Rgba(c) => c.alpha,
        }
    }
}

impl From<Hsla> for Color {
    fn from(c: Hsla) -> Self {
        Color::Hsla(c)
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::Rgba(c)
    }
}

/// Half-open hue interval `[start, end)` in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueBand {
    pub start: f32,
    pub end: f32,
}

impl HueBand {
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, hue: f32) -> bool {
        hue >= self.start && hue < self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.end > self.start)
    }

    /// Uniform hue from the band.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let hue = rng.gen_range(self.start..self.end);
        // float rounding can land exactly on `end` for wide bands
        if hue >= self.end {
            self.start
        } else {
            hue
        }
    }
}

/// Convert HSL (hue in degrees, s and l in 0-1) to RGB in 0-1.
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
