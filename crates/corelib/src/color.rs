//! Linear RGB colors.

/// Linear-space RGB color. Hex literals are interpreted as sRGB and
/// converted on construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::linear(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::linear(0.0, 0.0, 0.0);

    pub const fn linear(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB` in sRGB.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::from_srgb(channel(16), channel(8), channel(0))
    }

    /// sRGB components in `0..=1`.
    pub fn from_srgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: srgb_to_linear(r),
            g: srgb_to_linear(g),
            b: srgb_to_linear(b),
        }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::linear(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_extremes_map_to_unit_range() {
        let white = Color::from_hex(0xffffff).to_array();
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-6));
        assert_eq!(Color::from_hex(0x000000), Color::BLACK);
    }

    #[test]
    fn hex_channels_are_linearized() {
        let c = Color::from_hex(0x44aa88);
        // 0xaa = 0.667 sRGB is roughly 0.402 linear.
        assert!((c.g - 0.402).abs() < 1e-3);
        assert!(c.r < c.b && c.b < c.g);
    }
}
