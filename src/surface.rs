//! The 2D drawing boundary.
//!
//! A [`Surface`] is an immediate-mode canvas: the field paints onto it every
//! frame and never reads anything back. Implementations live in
//! [`raster`](crate::raster) (software pixels) and, on `wasm32`, in the
//! browser host. [`RecordingSurface`] keeps a log of calls instead of pixels.

use crate::color::Color;
use glam::Vec2;

/// Immediate-mode 2D drawing surface.
pub trait Surface {
    /// Pixel dimensions `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Change the pixel dimensions. Contents after a resize are unspecified.
    fn set_size(&mut self, width: u32, height: u32);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Fill the whole surface with a radial gradient from `inner` at
    /// `inner_radius` to `outer` at `outer_radius`. Pixels beyond the outer
    /// radius take the `outer` color.
    fn fill_radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        inner: Color,
        outer: Color,
    );

    /// Stroke a straight segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Fill a disc.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Apply a glow of the given blur radius to subsequent shapes.
    fn set_glow(&mut self, blur: f32, color: Color);

    /// Stop applying glow.
    fn clear_glow(&mut self);
}

/// One recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize {
        width: u32,
        height: u32,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    RadialGradient {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        inner: Color,
        outer: Color,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        glow: Option<(f32, Color)>,
    },
    SetGlow {
        blur: f32,
        color: Color,
    },
    ClearGlow,
}

/// A surface that records calls rather than pixels.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    glow: Option<(f32, Color)>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            glow: None,
            commands: Vec::new(),
        }
    }

    /// Every call since creation or the last [`clear`](Self::clear).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Glow currently in effect.
    pub fn glow(&self) -> Option<(f32, Color)> {
        self.glow
    }

    /// Forget recorded calls.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of particle shapes (lines and discs) drawn.
    pub fn shape_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::StrokeLine { .. } | DrawCommand::FillCircle { .. }
                )
            })
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        inner: Color,
        outer: Color,
    ) {
        self.commands.push(DrawCommand::RadialGradient {
            center,
            inner_radius,
            outer_radius,
            inner,
            outer,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
            glow: self.glow,
        });
    }

    fn set_glow(&mut self, blur: f32, color: Color) {
        self.glow = (blur > 0.0).then_some((blur, color));
        self.commands.push(DrawCommand::SetGlow { blur, color });
    }

    fn clear_glow(&mut self) {
        self.glow = None;
        self.commands.push(DrawCommand::ClearGlow);
    }
}
