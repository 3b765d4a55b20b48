//! The particle field and its per-frame composite.
//!
//! A [`Field`] owns every streak plus the random source used to spawn and
//! reset them. Each [`tick`](Field::tick) washes the previous frame with
//! translucent black (leaving motion trails), lays a faint glow over the
//! center, then advances and paints every particle in order.
//!
//! ```ignore
//! let mut field = Field::new(FieldConfig::default())?;
//! field.resize(1280, 720);
//!
//! // once per display refresh
//! field.tick(&mut surface);
//! ```

use crate::color::Rgba;
use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::particle::Particle;
use crate::surface::Surface;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Color of the trail wash, before the configured alpha.
const FADE_COLOR: Rgba = Rgba::new(0, 0, 0, 1.0);

/// A fixed-size set of streaks bound to one surface size.
#[derive(Debug, Clone)]
pub struct Field {
    config: FieldConfig,
    particles: Vec<Particle>,
    width: u32,
    height: u32,
    rng: SmallRng,
    frames: u64,
}

impl Field {
    /// Create an empty field. Call [`resize`](Self::resize) before ticking.
    ///
    /// The config is checked with [`FieldConfig::build`].
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Create a field with a reproducible random sequence.
    pub fn with_seed(config: FieldConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, rng: SmallRng) -> Result<Self, ConfigError> {
        let config = config.build()?;
        Ok(Self {
            particles: Vec::with_capacity(config.particle_count),
            config,
            width: 0,
            height: 0,
            rng,
            frames: 0,
        })
    }

    /// Adopt new surface dimensions and respawn every particle.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        let (w, h) = (width as f32, height as f32);
        let config = &self.config;
        let rng = &mut self.rng;
        self.particles.clear();
        self.particles
            .extend((0..config.particle_count).map(|_| Particle::new(rng, config, w, h)));

        log::debug!(
            "warp field rebuilt: {} particles on {}x{}",
            self.particles.len(),
            width,
            height
        );
    }

    /// Composite one frame onto `surface`.
    ///
    /// The surface is expected to match the field's size; a zero-sized field
    /// draws nothing.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (w, h) = (self.width as f32, self.height as f32);
        let config = &self.config;

        surface.fill_rect(
            0.0,
            0.0,
            w,
            h,
            Rgba {
                alpha: config.fade_alpha,
                ..FADE_COLOR
            }
            .into(),
        );

        surface.fill_radial_gradient(
            Vec2::new(w, h) * 0.5,
            0.0,
            config.vortex_radius,
            config.vortex_color.into(),
            Rgba::TRANSPARENT.into(),
        );

        for particle in &mut self.particles {
            particle.update(w, h, &mut self.rng, config);
            particle.draw(surface, config);
        }

        self.frames += 1;
    }

    /// Particles in paint order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Current dimensions `(width, height)`.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Frames composited since creation.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}
