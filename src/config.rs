//! Visual constants for the warp field.
//!
//! [`FieldConfig::default`] reproduces the stock look: twenty streaks, pink to
//! violet or cyan to green, with soft trails and a faint central glow.
//!
//! ```ignore
//! let config = FieldConfig::default()
//!     .with_particle_count(40)
//!     .with_speed_range(3.0..9.0)
//!     .build()?;
//! ```

use crate::color::{HueBand, Rgba};
use crate::error::ConfigError;
use std::ops::Range;

/// Pink to violet.
pub const WARM_BAND: HueBand = HueBand::new(280.0, 340.0);
/// Cyan to green.
pub const COOL_BAND: HueBand = HueBand::new(160.0, 220.0);

/// Tunable constants shared by the field and its particles.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Number of streaks in the field.
    pub particle_count: usize,
    /// Hue bands, each picked with equal probability on reset.
    pub hue_bands: [HueBand; 2],
    /// Streak saturation in percent.
    pub saturation: f32,
    /// Streak base lightness in percent.
    pub lightness: f32,
    /// Per-particle speed, in depth units per frame.
    pub speed: Range<f32>,
    /// Alpha of the black wash painted over the previous frame.
    pub fade_alpha: f32,
    /// Outer radius of the central vortex glow, in pixels.
    pub vortex_radius: f32,
    /// Inner color of the vortex glow.
    pub vortex_color: Rgba,
    /// Off-surface margin before a streak is culled, in pixels.
    pub cull_margin: f32,
    /// Multiplier applied to the perspective scale when projecting.
    pub projection_factor: f32,
    /// Blur radius of the bloom halo.
    pub glow_blur: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 20,
            hue_bands: [WARM_BAND, COOL_BAND],
            saturation: 80.0,
            lightness: 60.0,
            speed: 2.0..7.0,
            fade_alpha: 0.15,
            vortex_radius: 200.0,
            vortex_color: Rgba::new(100, 100, 255, 0.05),
            cull_margin: 100.0,
            projection_factor: 100.0,
            glow_blur: 15.0,
        }
    }
}

impl FieldConfig {
    /// Set the number of streaks.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set both hue bands.
    pub fn with_hue_bands(mut self, first: HueBand, second: HueBand) -> Self {
        self.hue_bands = [first, second];
        self
    }

    /// Set the per-particle speed range.
    pub fn with_speed_range(mut self, speed: Range<f32>) -> Self {
        self.speed = speed;
        self
    }

    /// Set the trail fade alpha. Lower values leave longer trails.
    pub fn with_fade_alpha(mut self, alpha: f32) -> Self {
        self.fade_alpha = alpha;
        self
    }

    /// Set the radius of the central glow.
    pub fn with_vortex_radius(mut self, radius: f32) -> Self {
        self.vortex_radius = radius;
        self
    }

    /// Set the culling margin.
    pub fn with_cull_margin(mut self, margin: f32) -> Self {
        self.cull_margin = margin;
        self
    }

    /// Check every constant is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        let [warm, cool] = self.hue_bands;
        for (name, value) in [
            ("speed.start", self.speed.start),
            ("speed.end", self.speed.end),
            ("hue_bands[0].start", warm.start),
            ("hue_bands[0].end", warm.end),
            ("hue_bands[1].start", cool.start),
            ("hue_bands[1].end", cool.end),
            ("saturation", self.saturation),
            ("lightness", self.lightness),
            ("vortex_radius", self.vortex_radius),
            ("cull_margin", self.cull_margin),
            ("projection_factor", self.projection_factor),
            ("glow_blur", self.glow_blur),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        if !(self.speed.start > 0.0 && self.speed.start < self.speed.end) {
            return Err(ConfigError::SpeedRange {
                min: self.speed.start,
                max: self.speed.end,
            });
        }
        for band in &self.hue_bands {
            if band.is_empty() {
                return Err(ConfigError::EmptyHueBand {
                    start: band.start,
                    end: band.end,
                });
            }
        }
        for (name, value) in [
            ("fade_alpha", self.fade_alpha),
            ("vortex_color.alpha", self.vortex_color.alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::AlphaOutOfRange { name, value });
            }
        }
        for (name, value) in [
            ("vortex_radius", self.vortex_radius),
            ("cull_margin", self.cull_margin),
            ("projection_factor", self.projection_factor),
            ("glow_blur", self.glow_blur),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }
        Ok(())
    }

    /// Validate and return the config.
    pub fn build(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count, 20);
        assert_eq!(config.speed, 2.0..7.0);
        assert_eq!(config.fade_alpha, 0.15);
        assert_eq!(config.vortex_radius, 200.0);
        assert_eq!(config.cull_margin, 100.0);
    }

    #[test]
    fn test_builder_chain() {
        let config = FieldConfig::default()
            .with_particle_count(64)
            .with_speed_range(1.0..3.0)
            .with_fade_alpha(0.3)
            .build()
            .unwrap();

        assert_eq!(config.particle_count, 64);
        assert_eq!(config.speed, 1.0..3.0);
        assert_eq!(config.fade_alpha, 0.3);
    }

    #[test]
    fn test_rejects_zero_particles() {
        let err = FieldConfig::default().with_particle_count(0).build();
        assert_eq!(err, Err(ConfigError::NoParticles));
    }

    #[test]
    fn test_rejects_bad_speed_ranges() {
        assert!(matches!(
            FieldConfig::default().with_speed_range(5.0..2.0).validate(),
            Err(ConfigError::SpeedRange { .. })
        ));
        assert!(matches!(
            FieldConfig::default().with_speed_range(0.0..2.0).validate(),
            Err(ConfigError::SpeedRange { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_band_and_bad_alpha() {
        let config = FieldConfig::default()
            .with_hue_bands(HueBand::new(10.0, 10.0), COOL_BAND);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyHueBand { .. })
        ));

        let config = FieldConfig::default().with_fade_alpha(1.2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AlphaOutOfRange { name: "fade_alpha", .. })
        ));

        let config = FieldConfig::default().with_cull_margin(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { name: "cull_margin", .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_speed() {
        assert!(matches!(
            FieldConfig::default().with_speed_range(2.0..f32::INFINITY).build(),
            Err(ConfigError::NonFinite { name: "speed.end", .. })
        ));
        assert!(matches!(
            FieldConfig::default().with_speed_range(f32::NAN..3.0).validate(),
            Err(ConfigError::NonFinite { name: "speed.start", .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_hue_band() {
        let config = FieldConfig::default()
            .with_hue_bands(WARM_BAND, HueBand::new(160.0, f32::INFINITY));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { name: "hue_bands[1].end", .. })
        ));

        let config = FieldConfig::default()
            .with_hue_bands(HueBand::new(f32::NEG_INFINITY, 340.0), COOL_BAND);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { name: "hue_bands[0].start", .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_radius() {
        let config = FieldConfig::default().with_vortex_radius(f32::INFINITY);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { name: "vortex_radius", .. })
        ));
    }
}
