// Simple color struct, created from an unsigned 32 representing RRGGBBAA
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const MATRIX_GREEN: Color = Color::from_u32(0x00ff41ff);
    pub const EMBER_ORANGE: Color = Color::from_u32(0xff4100ff);

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Canvas fill styles take css strings, opaque colors use the short hex form
    pub fn css(&self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = (self.a as f64 / 255.0 * 1000.0).round() / 1000.0;
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rrggbbaa() {
        let c = Color::from_u32(0x11223344);
        assert_eq!(c, Color { r: 0x11, g: 0x22, b: 0x33, a: 0x44 });
    }

    #[test]
    fn opaque_colors_use_hex() {
        assert_eq!(Color::MATRIX_GREEN.css(), "#00ff41");
        assert_eq!(Color::EMBER_ORANGE.css(), "#ff4100");
    }

    #[test]
    fn translucent_colors_use_rgba() {
        assert_eq!(Color::from_u32(0x0000000d).css(), "rgba(0, 0, 0, 0.051)");
    }
}
