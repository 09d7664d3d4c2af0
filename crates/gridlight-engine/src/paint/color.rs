/// Linear straight-alpha RGBA color.
///
/// The grid pipeline draws without blending, so colors are written to the
/// target as-is.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Dark blue frame background.
    pub const BACKGROUND: Self = Self::rgba(0.0, 0.0, 0.4, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn from_array(c: [f32; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }

    /// Converts to the `f64` color used by render-pass clear ops.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }

    /// Quantizes to 8-bit unorm channels the way a `*8Unorm` target stores them.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_quantizes_to_dark_blue() {
        assert_eq!(Color::BACKGROUND.to_rgba8(), [0, 0, 102, 255]);
    }

    #[test]
    fn quantization_clamps() {
        assert_eq!(Color::rgba(-1.0, 2.0, 0.5, 1.0).to_rgba8(), [0, 255, 128, 255]);
    }

    #[test]
    fn wgpu_conversion_widens() {
        let c = Color::rgba(0.25, 0.5, 0.75, 1.0).to_wgpu();
        assert_eq!((c.r, c.g, c.b, c.a), (0.25, 0.5, 0.75, 1.0));
    }
}
