//! # warpfield
//!
//! A "warp speed" star field: glowing light streaks radiate outward from the
//! center of a drawing surface, as if flying forward through space.
//!
//! The animation is a fixed set of [`Particle`]s owned by a [`Field`]. Every
//! frame the field washes the previous frame with translucent black (leaving
//! motion trails), paints a faint glow at the center, then advances and draws
//! each streak. All drawing goes through the [`Surface`] trait, and a
//! [`Driver`] runs the loop against whatever frame scheduler the host offers.
//!
//! ## Quick Start
//!
//! ```ignore
//! use warpfield::prelude::*;
//!
//! let mut driver = Driver::mount(
//!     Some(PixelSurface::new(1280, 720)),
//!     ManualHost::new(),
//!     FieldConfig::default(),
//! )?;
//! driver.start();
//! run_frames(&mut driver, 60);
//! ```
//!
//! ## Hosts
//!
//! | Target | Surface | Frames |
//! |--------|---------|--------|
//! | `wasm32` | `web::CanvasSurface` (`<canvas>` 2D context) | `requestAnimationFrame` |
//! | native | [`PixelSurface`] presented with wgpu | winit redraw requests |
//! | tests, offline | [`RecordingSurface`] or [`PixelSurface`] | [`ManualHost`] |
//!
//! ## Depth cycle
//!
//! Each particle starts at a random depth, loses `speed` depth per frame and
//! is projected with a perspective scale of `width / depth`. When the depth
//! runs out the particle is reset to the far plane on a new ray with a new
//! color from one of two hue bands (pink to violet, cyan to green).

pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod field;
pub mod particle;
pub mod raster;
pub mod surface;

#[cfg(not(target_arch = "wasm32"))]
mod gpu;
#[cfg(not(target_arch = "wasm32"))]
pub mod time;
#[cfg(not(target_arch = "wasm32"))]
pub mod window;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use color::{Color, HueBand, Hsla, Rgba};
pub use config::FieldConfig;
pub use driver::{run_frames, Driver, FrameHost, ManualHost};
pub use error::ConfigError;
pub use field::Field;
pub use glam::Vec2;
pub use particle::Particle;
pub use raster::PixelSurface;
pub use surface::{DrawCommand, RecordingSurface, Surface};

/// Common imports.
pub mod prelude {
    pub use crate::color::{Color, Hsla, Rgba};
    pub use crate::config::FieldConfig;
    pub use crate::driver::{run_frames, Driver, FrameHost, ManualHost};
    pub use crate::field::Field;
    pub use crate::raster::PixelSurface;
    pub use crate::surface::{RecordingSurface, Surface};
    pub use glam::Vec2;
}
