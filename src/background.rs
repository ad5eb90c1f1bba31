//! Gradient, glow and vignette layers behind the pin.

use crate::canvas::{Canvas, Rect};
use crate::color::{Color, VIGNETTE};

/// Blur radius of a glow relative to the glow's own radius.
const GLOW_SOFTNESS: f32 = 0.35;

/// How far the vignette ring's bounding box reaches past every edge.
const VIGNETTE_OVERSCAN: f32 = 0.25;
const VIGNETTE_WIDTH: f32 = 0.12;
const VIGNETTE_BLUR: f32 = 0.06;

/// Vertical gradient from `top` (first row) to `bottom` (last row).
///
/// `size` must be at least 2.
pub fn linear_gradient(size: u32, top: Color, bottom: Color) -> Canvas {
    let mut canvas = Canvas::new(size);
    let last = (size - 1) as f64;
    for y in 0..size {
        let t = y as f64 / last;
        canvas.fill_row(y, top.lerp(bottom, t));
    }
    canvas
}

/// Composite a soft round blob of `color` onto `base`.
pub fn add_radial_glow(base: &mut Canvas, center: (f32, f32), radius: f32, color: Color) {
    let mut glow = Canvas::new(base.size());
    glow.fill_circle(center, radius, color);
    glow.blur(radius * GLOW_SOFTNESS);
    base.composite_over(&glow, 0, 0);
}

/// Darken the edges of `base` with a blurred ring drawn mostly off-canvas.
pub fn apply_vignette(base: &mut Canvas) {
    let size = base.size();
    let s = size as f32;
    let overscan = (s * VIGNETTE_OVERSCAN).round();
    let bounds = Rect::new(-overscan, -overscan, s + overscan, s + overscan);

    let mut vignette = Canvas::new(size);
    vignette.stroke_ellipse(bounds, (s * VIGNETTE_WIDTH).round(), VIGNETTE);
    vignette.blur((s * VIGNETTE_BLUR).round());
    base.composite_over(&vignette, 0, 0);
}
