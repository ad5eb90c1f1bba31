//! Square RGBA raster that the icon artwork is painted on.
//!
//! Shapes are rasterized by sampling pixel centers and *replace* the pixels
//! they cover, like a painter working on a scratch layer. Layers are merged
//! with [`Canvas::composite_over`], which performs source-over blending.

use crate::color::{Color, TRANSPARENT};
use image::{
    imageops::{self, FilterType},
    Rgba, RgbaImage,
};
use std::ops::Range;

/// Axis-aligned rectangle in continuous pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Bounding box of a circle.
    pub fn around(center: (f32, f32), radius: f32) -> Self {
        let (cx, cy) = center;
        Self::new(cx - radius, cy - radius, cx + radius, cy + radius)
    }

    fn center(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    fn radii(&self) -> (f32, f32) {
        ((self.x1 - self.x0) / 2.0, (self.y1 - self.y0) / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn new(size: u32) -> Self {
        Self::filled(size, TRANSPARENT)
    }

    pub fn filled(size: u32, color: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(size, size, color.to_rgba()),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        debug_assert_eq!(image.width(), image.height(), "canvas must be square");
        Self { image }
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn fill_row(&mut self, y: u32, color: Color) {
        let color = color.to_rgba();
        for x in 0..self.size() {
            self.image.put_pixel(x, y, color);
        }
    }

    /// Fill the ellipse inscribed in `bounds`.
    pub fn fill_ellipse(&mut self, bounds: Rect, color: Color) {
        let (cx, cy) = bounds.center();
        let (rx, ry) = bounds.radii();
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }

        let color = color.to_rgba();
        for y in self.span(bounds.y0, bounds.y1) {
            for x in self.span(bounds.x0, bounds.x1) {
                if inside_ellipse(x, y, cx, cy, rx, ry) {
                    self.image.put_pixel(x, y, color);
                }
            }
        }
    }

    pub fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Color) {
        self.fill_ellipse(Rect::around(center, radius), color);
    }

    /// Stroke the outline of the ellipse inscribed in `bounds`. The stroke
    /// grows inwards from the bounding box by `width` pixels.
    pub fn stroke_ellipse(&mut self, bounds: Rect, width: f32, color: Color) {
        let (cx, cy) = bounds.center();
        let (rx, ry) = bounds.radii();
        if rx <= 0.0 || ry <= 0.0 || width <= 0.0 {
            return;
        }
        let (inner_rx, inner_ry) = (rx - width, ry - width);
        if inner_rx <= 0.0 || inner_ry <= 0.0 {
            self.fill_ellipse(bounds, color);
            return;
        }

        let color = color.to_rgba();
        for y in self.span(bounds.y0, bounds.y1) {
            for x in self.span(bounds.x0, bounds.x1) {
                if inside_ellipse(x, y, cx, cy, rx, ry)
                    && !inside_ellipse(x, y, cx, cy, inner_rx, inner_ry)
                {
                    self.image.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Fill a simple polygon using the even-odd rule.
    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        if points.len() < 3 {
            return;
        }

        let (mut x0, mut y0) = (f32::INFINITY, f32::INFINITY);
        let (mut x1, mut y1) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for &(x, y) in points {
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }

        let color = color.to_rgba();
        for y in self.span(y0, y1) {
            for x in self.span(x0, x1) {
                if inside_polygon(points, x as f32 + 0.5, y as f32 + 0.5) {
                    self.image.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Gaussian-like blur of standard deviation `radius`.
    ///
    /// Three successive box blurs on premultiplied alpha, with edge pixels
    /// repeated beyond the border.
    pub fn blur(&mut self, radius: f32) {
        if radius <= 0.0 {
            return;
        }

        let size = self.size() as usize;
        let mut pixels: Vec<[f32; 4]> = self.image.pixels().map(premultiply).collect();
        let mut scratch = vec![[0.0; 4]; pixels.len()];

        for box_radius in box_radii(radius) {
            if box_radius == 0 {
                continue;
            }
            box_blur(&pixels, &mut scratch, size, box_radius, Axis::Horizontal);
            box_blur(&scratch, &mut pixels, size, box_radius, Axis::Vertical);
        }

        for (dst, src) in self.image.pixels_mut().zip(pixels) {
            *dst = unpremultiply(src);
        }
    }

    /// Blend `top` over this canvas, shifted by (`dx`, `dy`). Pixels of `top`
    /// that land outside the canvas are dropped.
    pub fn composite_over(&mut self, top: &Canvas, dx: i64, dy: i64) {
        let size = self.size() as i64;
        for (x, y, src) in top.image.enumerate_pixels() {
            let (tx, ty) = (x as i64 + dx, y as i64 + dy);
            if src[3] == 0 || tx < 0 || ty < 0 || tx >= size || ty >= size {
                continue;
            }
            let dst = self.image.get_pixel_mut(tx as u32, ty as u32);
            *dst = blend_over(*src, *dst);
        }
    }

    /// Cut `inset` pixels off every edge and scale the remainder back up to
    /// the original size.
    pub fn crop_inset(&self, inset: u32) -> Canvas {
        let size = self.size();
        let side = size.saturating_sub(2 * inset);
        let cropped = imageops::crop_imm(&self.image, inset, inset, side, side).to_image();
        Canvas::from_image(imageops::resize(&cropped, size, size, FilterType::Lanczos3))
    }

    /// Lanczos3 resample to `size`×`size`.
    pub fn resized(&self, size: u32) -> Canvas {
        if size == self.size() {
            return self.clone();
        }
        Canvas::from_image(imageops::resize(&self.image, size, size, FilterType::Lanczos3))
    }

    /// Whole pixels whose centers may fall within `[lo, hi]`, clipped to the canvas.
    fn span(&self, lo: f32, hi: f32) -> Range<u32> {
        let limit = self.size();
        let start = (lo.floor().max(0.0) as u32).min(limit);
        let end = (hi.ceil().max(0.0) as u32).min(limit);
        start..end.max(start)
    }
}

fn inside_ellipse(x: u32, y: u32, cx: f32, cy: f32, rx: f32, ry: f32) -> bool {
    let dx = (x as f32 + 0.5 - cx) / rx;
    let dy = (y as f32 + 0.5 - cy) / ry;
    dx * dx + dy * dy <= 1.0
}

fn inside_polygon(points: &[(f32, f32)], x: f32, y: f32) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return TRANSPARENT.to_rgba();
    }

    let channel = |i: usize| {
        let value = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

fn premultiply(pixel: &Rgba<u8>) -> [f32; 4] {
    let alpha = pixel[3] as f32;
    let scale = alpha / 255.0;
    [
        pixel[0] as f32 * scale,
        pixel[1] as f32 * scale,
        pixel[2] as f32 * scale,
        alpha,
    ]
}

fn unpremultiply(value: [f32; 4]) -> Rgba<u8> {
    let alpha = value[3].round().clamp(0.0, 255.0);
    if alpha == 0.0 {
        return TRANSPARENT.to_rgba();
    }

    let scale = 255.0 / value[3];
    let channel = |c: f32| (c * scale).round().clamp(0.0, 255.0) as u8;
    Rgba([
        channel(value[0]),
        channel(value[1]),
        channel(value[2]),
        alpha as u8,
    ])
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Box radii of three passes that together approximate a Gaussian of
/// standard deviation `sigma`.
fn box_radii(sigma: f32) -> [usize; 3] {
    const PASSES: f32 = 3.0;

    let variance = 12.0 * sigma * sigma;
    let ideal = (variance / PASSES + 1.0).sqrt();
    let mut lower = ideal.floor() as i64;
    if lower % 2 == 0 {
        lower -= 1;
    }
    let upper = lower + 2;
    let lower_f = lower as f32;
    let lower_count = ((variance - PASSES * lower_f * lower_f - 4.0 * PASSES * lower_f - 3.0 * PASSES)
        / (-4.0 * lower_f - 4.0))
        .round() as i64;

    let mut radii = [0; 3];
    for (pass, radius) in radii.iter_mut().enumerate() {
        let width = if (pass as i64) < lower_count { lower } else { upper };
        *radius = ((width - 1) / 2).max(0) as usize;
    }
    radii
}

/// One box-blur pass along `axis` with a running sum over `2 * radius + 1` pixels.
fn box_blur(src: &[[f32; 4]], dst: &mut [[f32; 4]], size: usize, radius: usize, axis: Axis) {
    let last = size - 1;
    let weight = 1.0 / (2 * radius + 1) as f32;

    for line in 0..size {
        let at = |i: usize| match axis {
            Axis::Horizontal => line * size + i,
            Axis::Vertical => i * size + line,
        };

        let mut sum = [0.0f32; 4];
        for offset in -(radius as i64)..=(radius as i64) {
            let p = src[at(offset.clamp(0, last as i64) as usize)];
            for c in 0..4 {
                sum[c] += p[c];
            }
        }

        for i in 0..size {
            let out = &mut dst[at(i)];
            for c in 0..4 {
                out[c] = sum[c] * weight;
            }

            let incoming = src[at((i + radius + 1).min(last))];
            let outgoing = src[at(i.saturating_sub(radius))];
            for c in 0..4 {
                sum[c] += incoming[c] - outgoing[c];
            }
        }
    }
}
