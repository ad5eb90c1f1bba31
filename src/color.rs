//! Straight-alpha RGBA color and the palette used by the icon artwork.

use image::Rgba;

/// RGBA color with 8 bits per channel, alpha not premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation towards `other`, channel by channel.
    ///
    /// `t` is expected in `[0, 1]`; values outside extrapolate and saturate
    /// at the channel bounds.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        fn channel(from: u8, to: u8, t: f64) -> u8 {
            (from as f64 + (to as f64 - from as f64) * t).round() as u8
        }

        Color {
            r: channel(self.r, other.r, t),
            g: channel(self.g, other.g, t),
            b: channel(self.b, other.b, t),
            a: channel(self.a, other.a, t),
        }
    }

    pub const fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        color.to_rgba()
    }
}

/// Top of the background gradient (fuchsia-400).
pub const BRAND_TOP: Color = Color::rgb(232, 121, 249);
/// Bottom of the background gradient (cyan-400).
pub const BRAND_BOTTOM: Color = Color::rgb(34, 211, 238);

pub const GLOW_ROSE: Color = Color::rgba(251, 113, 133, 80);
pub const GLOW_SKY: Color = Color::rgba(56, 189, 248, 70);
pub const VIGNETTE: Color = Color::rgba(0, 0, 0, 130);

pub const PIN_SHADOW: Color = Color::rgba(0, 0, 0, 110);
pub const PIN_BODY: Color = Color::rgba(255, 255, 255, 245);
/// Navy dot in the middle of the pin head (slate-900).
pub const PIN_DOT: Color = Color::rgb(15, 23, 42);
pub const PIN_OUTLINE: Color = Color::rgba(255, 255, 255, 70);

pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [(Color, Color); 4] = [
        (BRAND_TOP, BRAND_BOTTOM),
        (GLOW_ROSE, GLOW_SKY),
        (TRANSPARENT, PIN_BODY),
        (PIN_DOT, PIN_OUTLINE),
    ];

    #[test]
    fn test_lerp_endpoints() {
        for (a, b) in SAMPLES {
            assert_eq!(a.lerp(b, 0.0), a);
            assert_eq!(a.lerp(b, 1.0), b);
            assert_eq!(b.lerp(a, 0.0), b);
            assert_eq!(b.lerp(a, 1.0), a);
        }
    }

    #[test]
    fn test_lerp_stays_between_endpoints() {
        fn between(v: u8, x: u8, y: u8) -> bool {
            x.min(y) <= v && v <= x.max(y)
        }

        for (a, b) in SAMPLES {
            for step in 0..=20 {
                let t = step as f64 / 20.0;
                let c = a.lerp(b, t);
                assert!(between(c.r, a.r, b.r), "red out of range at t={t}: {c:?}");
                assert!(between(c.g, a.g, b.g), "green out of range at t={t}: {c:?}");
                assert!(between(c.b, a.b, b.b), "blue out of range at t={t}: {c:?}");
                assert!(between(c.a, a.a, b.a), "alpha out of range at t={t}: {c:?}");
            }
        }
    }

    #[test]
    fn test_lerp_midpoint_rounds_to_nearest() {
        let c = Color::rgba(0, 10, 100, 255).lerp(Color::rgba(3, 20, 200, 0), 0.5);
        assert_eq!(c, Color::rgba(2, 15, 150, 128));
    }

    #[test]
    fn test_to_rgba() {
        assert_eq!(PIN_DOT.to_rgba(), Rgba([15, 23, 42, 255]));
        assert_eq!(Rgba::from(GLOW_SKY), Rgba([56, 189, 248, 70]));
    }
}
