//! The map-pin glyph: a round head with a pointed tail and a dark center dot.

use crate::canvas::{Canvas, Rect};
use crate::color::{PIN_BODY, PIN_DOT, PIN_OUTLINE, PIN_SHADOW};

/// Vertical position of the pin head's center, as a fraction of the icon size.
const HEAD_Y: f32 = 0.42;
/// Radius of the pin head, as a fraction of the icon size.
const HEAD_RADIUS: f32 = 0.16;
/// Half the width of the tail's base, relative to the head radius.
const TAIL_HALF_WIDTH: f32 = 0.75;
/// Distance from the head center down to the tail tip, relative to the head radius.
const TAIL_TIP: f32 = 2.2;
const SHADOW_TAIL_BASE: f32 = 0.25;
const BODY_TAIL_BASE: f32 = 0.18;
/// Radius of the center dot, relative to the head radius.
const DOT_RADIUS: f32 = 0.32;
const OUTLINE_WIDTH: f32 = 2.0;

const SHADOW_BLUR: f32 = 0.02;
const SHADOW_DROP: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
struct PinGeometry {
    cx: f32,
    cy: f32,
    r: f32,
}

impl PinGeometry {
    fn for_size(size: u32) -> Self {
        let s = size as f32;
        Self {
            cx: (size / 2) as f32,
            cy: (s * HEAD_Y).round(),
            r: (s * HEAD_RADIUS).round(),
        }
    }

    fn center(&self) -> (f32, f32) {
        (self.cx, self.cy)
    }

    /// Tail triangle whose base sits `base_offset` head radii below the center.
    fn tail(&self, base_offset: f32) -> [(f32, f32); 3] {
        let Self { cx, cy, r } = *self;
        [
            (cx - r * TAIL_HALF_WIDTH, cy + r * base_offset),
            (cx + r * TAIL_HALF_WIDTH, cy + r * base_offset),
            (cx, cy + r * TAIL_TIP),
        ]
    }
}

/// Paint the pin, with its drop shadow, onto `base`.
pub fn draw_pin(base: &mut Canvas) {
    let size = base.size();
    let s = size as f32;
    let pin = PinGeometry::for_size(size);

    let mut shadow = Canvas::new(size);
    shadow.fill_circle(pin.center(), pin.r, PIN_SHADOW);
    shadow.fill_polygon(&pin.tail(SHADOW_TAIL_BASE), PIN_SHADOW);
    shadow.blur((s * SHADOW_BLUR).round());
    base.composite_over(&shadow, 0, (s * SHADOW_DROP).round() as i64);

    let mut body = Canvas::new(size);
    body.fill_circle(pin.center(), pin.r, PIN_BODY);
    body.fill_polygon(&pin.tail(BODY_TAIL_BASE), PIN_BODY);
    body.fill_circle(pin.center(), (pin.r * DOT_RADIUS).round(), PIN_DOT);
    body.stroke_ellipse(Rect::around(pin.center(), pin.r), OUTLINE_WIDTH, PIN_OUTLINE);
    base.composite_over(&body, 0, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use image::Rgba;

    const GROUND: Color = Color::rgb(40, 120, 200);

    #[test]
    fn test_geometry_scales_with_size() {
        let pin = PinGeometry::for_size(512);
        assert_eq!(pin.center(), (256.0, 215.0));
        assert_eq!(pin.r, 82.0);

        let tail = pin.tail(BODY_TAIL_BASE);
        assert_eq!(tail[2], (256.0, 215.0 + 82.0 * 2.2));
        assert!(tail[0].0 < pin.cx && tail[1].0 > pin.cx);
    }

    #[test]
    fn test_dot_is_drawn_at_head_center() {
        let mut canvas = Canvas::filled(256, GROUND);
        draw_pin(&mut canvas);

        let pin = PinGeometry::for_size(256);
        let dot = canvas.pixel(pin.cx as u32, pin.cy as u32);
        assert_eq!(dot, PIN_DOT.to_rgba());
    }

    #[test]
    fn test_body_is_near_white_and_opaque() {
        let mut canvas = Canvas::filled(256, GROUND);
        draw_pin(&mut canvas);

        let pin = PinGeometry::for_size(256);
        // halfway between the dot and the outline
        let x = (pin.cx + pin.r * 0.65) as u32;
        let body = canvas.pixel(x, pin.cy as u32);
        assert_eq!(body[3], 255);
        assert!(body[0] > 240 && body[1] > 240 && body[2] > 240, "{body:?}");

        // tail, just above its tip
        let tail = canvas.pixel(pin.cx as u32, (pin.cy + pin.r * 1.9) as u32);
        assert!(tail[0] > 200, "{tail:?}");
    }

    #[test]
    fn test_shadow_darkens_below_tail() {
        let mut canvas = Canvas::filled(256, GROUND);
        draw_pin(&mut canvas);

        let pin = PinGeometry::for_size(256);
        let below = canvas.pixel(pin.cx as u32, (pin.cy + pin.r * 2.2 + 3.0) as u32);
        assert!(below[2] < 200, "{below:?}");
        assert_eq!(canvas.pixel(0, 0), Rgba([40, 120, 200, 255]));
    }
}
