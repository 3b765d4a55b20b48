//! Software [`Surface`] backed by an RGBA pixel buffer.
//!
//! Shapes are rasterized from signed distance functions with a one-pixel
//! anti-aliased edge and composited source-over. Glow is approximated by a
//! halo that fades out over the blur radius, painted beneath the shape.

use crate::color::Color;
use crate::surface::Surface;
use glam::Vec2;
use image::RgbaImage;

/// CPU-side drawing surface.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    image: RgbaImage,
    glow: Option<(f32, Color)>,
}

impl PixelSurface {
    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            glow: None,
        }
    }

    /// Backing image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA8 bytes, row-major, tightly packed.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Pixel at `(x, y)` as `[r, g, b, a]`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Blend `color` (straight alpha, unit floats) into one pixel.
    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: [f32; 4]) {
        let src_a = color[3];
        if src_a <= 0.0 {
            return;
        }
        let px = self.image.get_pixel_mut(x, y);
        let dst_a = px.0[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            px.0 = [0, 0, 0, 0];
            return;
        }
        for i in 0..3 {
            let dst = px.0[i] as f32 / 255.0;
            let out = (color[i] * src_a + dst * dst_a * (1.0 - src_a)) / out_a;
            px.0[i] = to_u8(out);
        }
        px.0[3] = to_u8(out_a);
    }

    /// Pixel rectangle covering `min..max`, clipped to the image.
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(w);
        let y1 = max.y.ceil().min(h);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Rasterize a shape given by its signed distance function `sd`
    /// (negative inside) whose bounds are `min..max`.
    fn paint<F>(&mut self, min: Vec2, max: Vec2, sd: F, color: Color)
    where
        F: Fn(Vec2) -> f32,
    {
        let rgba = color.to_rgba().to_unit();
        let glow = self.glow.map(|(blur, c)| (blur, c.to_rgba().to_unit()));
        let reach = glow.map_or(1.0, |(blur, _)| blur + 1.0);

        let Some((x0, y0, x1, y1)) =
            self.clip(min - Vec2::splat(reach), max + Vec2::splat(reach))
        else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let d = sd(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));

                if let Some((blur, glow_color)) = glow {
                    if d > 0.0 && d < blur {
                        let falloff = 1.0 - d / blur;
                        let mut halo = glow_color;
                        halo[3] *= rgba[3] * falloff * falloff;
                        self.blend(x, y, halo);
                    }
                }

                let coverage = (0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let mut c = rgba;
                    c[3] *= coverage;
                    self.blend(x, y, c);
                }
            }
        }
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let rgba = color.to_rgba().to_unit();
        let Some((x0, y0, x1, y1)) = self.clip(Vec2::new(x, y), Vec2::new(x + width, y + height))
        else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, rgba);
            }
        }
    }

    fn fill_radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        inner: Color,
        outer: Color,
    ) {
        let inner = premultiply(inner.to_rgba().to_unit());
        let outer = premultiply(outer.to_rgba().to_unit());
        let span = (outer_radius - inner_radius).max(f32::EPSILON);

        // Beyond the outer radius only `outer` is painted; skip it when clear.
        let (min, max) = if outer[3] <= 0.0 {
            (
                center - Vec2::splat(outer_radius),
                center + Vec2::splat(outer_radius),
            )
        } else {
            let (w, h) = self.image.dimensions();
            (Vec2::ZERO, Vec2::new(w as f32, h as f32))
        };
        let Some((x0, y0, x1, y1)) = self.clip(min, max) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let t = ((d - inner_radius) / span).clamp(0.0, 1.0);
                let mut c = [0.0; 4];
                for i in 0..4 {
                    c[i] = inner[i] + (outer[i] - inner[i]) * t;
                }
                self.blend(x, y, unpremultiply(c));
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if !(width > 0.0) {
            return;
        }
        let half = width * 0.5;
        // hairlines keep one pixel of coverage and fade instead of thinning
        let (half, color) = if width < 1.0 {
            let mut rgba = color.to_rgba();
            rgba.alpha *= width;
            (0.5, Color::Rgba(rgba))
        } else {
            (half, color)
        };
        let min = from.min(to) - Vec2::splat(half);
        let max = from.max(to) + Vec2::splat(half);
        self.paint(min, max, |p| segment_distance(p, from, to) - half, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !(radius > 0.0) {
            return;
        }
        let r = Vec2::splat(radius);
        self.paint(center - r, center + r, |p| p.distance(center) - radius, color);
    }

    fn set_glow(&mut self, blur: f32, color: Color) {
        self.glow = (blur > 0.0).then_some((blur, color));
    }

    fn clear_glow(&mut self) {
        self.glow = None;
    }
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn premultiply(c: [f32; 4]) -> [f32; 4] {
    [c[0] * c[3], c[1] * c[3], c[2] * c[3], c[3]]
}

fn unpremultiply(c: [f32; 4]) -> [f32; 4] {
    if c[3] <= 0.0 {
        return [0.0; 4];
    }
    [c[0] / c[3], c[1] / c[3], c[2] / c[3], c[3]]
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
