//! A single light streak.
//!
//! Each particle flies along a fixed ray from the surface center toward the
//! viewer. Its `depth` shrinks by `speed` every frame; the perspective scale
//! `width / depth` pushes its projected position outward faster and faster
//! until the depth runs out, at which point the particle is reset to the far
//! plane on a fresh ray with a fresh color.

use crate::color::Hsla;
use crate::config::FieldConfig;
use crate::surface::Surface;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Lightness of the trail stroke.
const TRAIL_LIGHTNESS: f32 = 60.0;
/// Lightness of the bright head.
const HEAD_LIGHTNESS: f32 = 80.0;
/// Lightness of the bloom halo.
const BLOOM_LIGHTNESS: f32 = 90.0;
/// Line width at full brightness.
const MAX_LINE_WIDTH: f32 = 3.0;

/// One streak of the warp field.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    depth: f32,
    angle: f32,
    speed: f32,
    color: Hsla,
    position: Vec2,
    prev_position: Vec2,
}

impl Particle {
    /// Spawn a particle at a random depth in `[0, width)` so a fresh field is
    /// not synchronized.
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        config: &FieldConfig,
        width: f32,
        height: f32,
    ) -> Self {
        let depth = if width > 0.0 {
            rng.gen_range(0.0..width)
        } else {
            0.0
        };
        let speed = rng.gen_range(config.speed.clone());
        let mut particle = Self::at(depth, 0.0, speed, Hsla::new(0.0, 0.0, 0.0));
        particle.reroll(rng, config);

        let center = Vec2::new(width, height) * 0.5;
        particle.position = particle
            .project_at(depth, width, height, config.projection_factor)
            .unwrap_or(center);
        particle.prev_position = particle
            .project_at(depth + speed, width, height, config.projection_factor)
            .unwrap_or(center);
        particle
    }

    /// A particle with explicit state. Projected positions start at the origin
    /// and are filled in by the next [`update`](Self::update).
    pub fn at(depth: f32, angle: f32, speed: f32, color: Hsla) -> Self {
        Self {
            depth,
            angle,
            speed,
            color,
            position: Vec2::ZERO,
            prev_position: Vec2::ZERO,
        }
    }

    /// Distance from the viewer.
    #[inline]
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Direction of travel on screen, in radians.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Depth lost per frame.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Base color at full alpha.
    #[inline]
    pub fn color(&self) -> Hsla {
        self.color
    }

    /// Projected head position.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Projected position one frame ago; the tail of the trail.
    #[inline]
    pub fn prev_position(&self) -> Vec2 {
        self.prev_position
    }

    /// Send the particle back to the far plane on a new ray and color.
    /// Speed is kept.
    pub fn reset<R: Rng + ?Sized>(&mut self, width: f32, rng: &mut R, config: &FieldConfig) {
        self.depth = width;
        self.reroll(rng, config);
    }

    fn reroll<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &FieldConfig) {
        self.angle = rng.gen_range(0.0..TAU);
        let band = if rng.gen_bool(0.5) {
            config.hue_bands[0]
        } else {
            config.hue_bands[1]
        };
        self.color = Hsla::new(band.sample(rng), config.saturation, config.lightness);
    }

    /// Advance one frame.
    ///
    /// A particle that reaches the viewer is reset and keeps its previous
    /// projection for this frame.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        width: f32,
        height: f32,
        rng: &mut R,
        config: &FieldConfig,
    ) {
        self.depth -= self.speed;

        let factor = config.projection_factor;
        match (
            self.project_at(self.depth, width, height, factor),
            self.project_at(self.depth + self.speed, width, height, factor),
        ) {
            (Some(position), Some(prev_position)) => {
                self.position = position;
                self.prev_position = prev_position;
            }
            _ => self.reset(width, rng, config),
        }
    }

    /// Screen position of this particle's ray at `depth`, or `None` when the
    /// depth has reached the viewer.
    pub fn project_at(&self, depth: f32, width: f32, height: f32, factor: f32) -> Option<Vec2> {
        if !(depth > 0.0) {
            return None;
        }
        let center = Vec2::new(width, height) * 0.5;
        let scale = width / depth;
        Some(center + Vec2::from_angle(self.angle) * scale * factor)
    }

    /// Whether the head lies within the surface grown by `margin` on each side.
    pub fn is_visible(&self, width: f32, height: f32, margin: f32) -> bool {
        let p = self.position;
        p.x >= -margin && p.x <= width + margin && p.y >= -margin && p.y <= height + margin
    }

    /// Brightness in `0.0..=1.0`, rising as the particle nears the viewer.
    pub fn brightness(&self, width: f32) -> f32 {
        if width > 0.0 {
            (1.0 - self.depth / width).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Paint the trail, head and bloom. Does nothing when culled.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, config: &FieldConfig) {
        let (width, height) = surface.size();
        let (width, height) = (width as f32, height as f32);
        if !self.is_visible(width, height, config.cull_margin) {
            return;
        }

        let alpha = self.brightness(width);
        let line_width = alpha * MAX_LINE_WIDTH;

        surface.stroke_line(
            self.prev_position,
            self.position,
            line_width,
            self.color.with_lightness(TRAIL_LIGHTNESS).with_alpha(alpha).into(),
        );

        surface.fill_circle(
            self.position,
            line_width * 0.8,
            self.color.with_lightness(HEAD_LIGHTNESS).with_alpha(alpha).into(),
        );

        surface.set_glow(config.glow_blur, self.color.into());
        surface.fill_circle(
            self.position,
            line_width * 1.5,
            self.color
                .with_lightness(BLOOM_LIGHTNESS)
                .with_alpha(alpha * 0.5)
                .into(),
        );
        surface.clear_glow();
    }
}
