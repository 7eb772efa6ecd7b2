/// Straight-alpha RGBA color with channels in `[0, 1]`.
///
/// This is the resolved form every backend receives. Colors are kept in the
/// framebuffer's encoding (no sRGB linearization) so channel values written by
/// sketches show up unchanged on screen.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Creates a color from `0..=255` channel bytes.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Rounds each channel back to a byte, clamping to `0..=255`.
    #[inline]
    pub fn to_u8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_survive_normalization() {
        let c = Rgba::from_u8(255, 0, 128, 64);
        assert_eq!(c.to_u8(), [255, 0, 128, 64]);
    }

    #[test]
    fn to_u8_clamps_out_of_range() {
        let c = Rgba::new(1.5, -0.2, 0.5, 1.0);
        assert_eq!(c.to_u8(), [255, 0, 128, 255]);
    }
}
