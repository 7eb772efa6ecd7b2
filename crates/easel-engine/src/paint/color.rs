use super::convert::{hsb_to_rgb, hsl_to_rgb};
use super::Rgba;

/// How the three channels of a [`Color`] are interpreted.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ColorSpace {
    #[default]
    Rgb,
    /// Hue, saturation, brightness.
    Hsb,
    /// Hue, saturation, lightness.
    Hsl,
}

/// Sketch-facing color value: three channel bytes plus alpha.
///
/// Untagged colors (`space == None`) are read through whatever color space is
/// active when they are handed to a drawing call. Tagged colors always use
/// their own space.
///
/// Conversions exist for gray levels and tuples so call sites read like
/// Processing: `ctx.fill(128)`, `ctx.fill((255, 0, 0))`,
/// `ctx.stroke((0, 255, 0, 128))`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Color {
    pub channels: [u8; 3],
    pub alpha: u8,
    pub space: Option<ColorSpace>,
}

impl Color {
    /// Untagged opaque color.
    #[inline]
    pub const fn new(c0: u8, c1: u8, c2: u8) -> Self {
        Self { channels: [c0, c1, c2], alpha: 255, space: None }
    }

    /// Untagged color with explicit alpha.
    #[inline]
    pub const fn with_alpha_channels(c0: u8, c1: u8, c2: u8, alpha: u8) -> Self {
        Self { channels: [c0, c1, c2], alpha, space: None }
    }

    /// Untagged gray level: all three channels set to `level`.
    #[inline]
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { channels: [r, g, b], alpha: 255, space: Some(ColorSpace::Rgb) }
    }

    #[inline]
    pub const fn hsb(h: u8, s: u8, b: u8) -> Self {
        Self { channels: [h, s, b], alpha: 255, space: Some(ColorSpace::Hsb) }
    }

    #[inline]
    pub const fn hsl(h: u8, s: u8, l: u8) -> Self {
        Self { channels: [h, s, l], alpha: 255, space: Some(ColorSpace::Hsl) }
    }

    /// Replaces the alpha channel.
    #[inline]
    pub const fn alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    /// Resolves the channels to normalized RGBA.
    ///
    /// `active` is used unless the color carries its own space. Alpha is
    /// never derived from the hue channels.
    pub fn resolve(self, active: ColorSpace) -> Rgba {
        let [c0, c1, c2] = self.channels;
        let alpha = self.alpha as f32 / 255.0;

        match self.space.unwrap_or(active) {
            ColorSpace::Rgb => Rgba::new(
                c0 as f32 / 255.0,
                c1 as f32 / 255.0,
                c2 as f32 / 255.0,
                alpha,
            ),
            ColorSpace::Hsb => {
                let [r, g, b] = hsb_to_rgb(c0, c1, c2);
                Rgba::new(r, g, b, alpha)
            }
            ColorSpace::Hsl => {
                let [r, g, b] = hsl_to_rgb(c0, c1, c2);
                Rgba::new(r, g, b, alpha)
            }
        }
    }
}

impl From<u8> for Color {
    #[inline]
    fn from(level: u8) -> Self {
        Color::gray(level)
    }
}

impl From<(u8, u8)> for Color {
    /// Gray level with alpha.
    #[inline]
    fn from((level, alpha): (u8, u8)) -> Self {
        Color::gray(level).alpha(alpha)
    }
}

impl From<(u8, u8, u8)> for Color {
    #[inline]
    fn from((c0, c1, c2): (u8, u8, u8)) -> Self {
        Color::new(c0, c1, c2)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    #[inline]
    fn from((c0, c1, c2, a): (u8, u8, u8, u8)) -> Self {
        Color::with_alpha_channels(c0, c1, c2, a)
    }
}

impl From<[u8; 4]> for Color {
    #[inline]
    fn from([c0, c1, c2, a]: [u8; 4]) -> Self {
        Color::with_alpha_channels(c0, c1, c2, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::convert::CHANNEL_SCALE;

    #[test]
    fn untagged_color_follows_active_space() {
        let c = Color::new(0, 0, 255);
        assert_eq!(c.resolve(ColorSpace::Rgb).to_u8(), [0, 0, 255, 255]);

        // In HSB the same bytes mean "no saturation, full brightness".
        let hsb = c.resolve(ColorSpace::Hsb);
        assert_eq!(hsb.r, hsb.g);
        assert_eq!(hsb.g, hsb.b);
        assert!((hsb.r - 255.0 / CHANNEL_SCALE).abs() < 1e-6);
    }

    #[test]
    fn tagged_color_ignores_active_space() {
        let c = Color::rgb(255, 0, 0);
        assert_eq!(c.resolve(ColorSpace::Hsb).to_u8(), [255, 0, 0, 255]);
    }

    #[test]
    fn alpha_passes_through_every_space() {
        for space in [ColorSpace::Rgb, ColorSpace::Hsb, ColorSpace::Hsl] {
            let c = Color::new(10, 200, 90).alpha(51);
            assert!((c.resolve(space).a - 0.2).abs() < 1e-6);
        }
    }

    #[test]
    fn tuple_conversions() {
        assert_eq!(Color::from(7u8), Color::new(7, 7, 7));
        assert_eq!(Color::from((7u8, 9u8)).alpha, 9);
        assert_eq!(Color::from((1u8, 2u8, 3u8, 4u8)).channels, [1, 2, 3]);
        assert_eq!(Color::from([1u8, 2, 3, 4]).alpha, 4);
    }
}
