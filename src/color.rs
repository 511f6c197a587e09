/// Linear RGB colour with channels in `[0, 1]`; the payload of scene cells
/// in the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // 0RGB, the layout softbuffer presents
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

#[inline]
fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).floor() as u8
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn red() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
    pub const fn green() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }
    pub const fn blue() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
    pub const fn yellow() -> Self {
        Self::new(1.0, 1.0, 0.0)
    }
    pub const fn purple() -> Self {
        Self::new(1.0, 0.0, 1.0)
    }
    pub const fn cyan() -> Self {
        Self::new(0.0, 1.0, 1.0)
    }

    /// Colour from a glyph of the built-in palette
    /// (`r`, `g`, `b`, `y`, `p`, `c`).
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            'r' => Some(Self::red()),
            'g' => Some(Self::green()),
            'b' => Some(Self::blue()),
            'y' => Some(Self::yellow()),
            'p' => Some(Self::purple()),
            'c' => Some(Self::cyan()),
            _ => None,
        }
    }

    #[must_use]
    pub fn brightness(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Packed framebuffer pixel; channels outside `[0, 1]` saturate.
    pub fn to_pixel(self) -> u32 {
        pack_rgb(channel(self.r), channel(self.g), channel(self.b))
    }
}

impl From<[f32; 3]> for Color {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_as_0rgb() {
        assert_eq!(Color::red().to_pixel(), 0x00FF_0000);
        assert_eq!(Color::green().to_pixel(), 0x0000_FF00);
        assert_eq!(Color::blue().to_pixel(), 0x0000_00FF);
        assert_eq!(pack_rgb(0x18, 0x18, 0x18), 0x0018_1818);
    }

    #[test]
    fn brightness_scales_and_saturates() {
        assert_eq!(Color::yellow().brightness(0.5).to_pixel(), pack_rgb(127, 127, 0));
        assert_eq!(Color::cyan().brightness(4.0).to_pixel(), Color::cyan().to_pixel());
        assert_eq!(Color::purple().brightness(0.0).to_pixel(), 0);
    }

    #[test]
    fn palette_glyphs() {
        assert_eq!(Color::from_glyph('y'), Some(Color::yellow()));
        assert_eq!(Color::from_glyph('x'), None);
    }
}
