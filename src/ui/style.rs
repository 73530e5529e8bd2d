use serde::{Deserialize, Serialize};

/// Packed 32-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// Shown behind the map while the style is still loading.
    pub const LIGHT_GRAY: Color = Color(0xFFF0_E9E1);
    pub const TRANSPARENT: Color = Color(0);

    pub fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(u32::from_be_bytes([a, r, g, b]))
    }

    pub fn argb(self) -> u32 {
        self.0
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Parses `#RRGGBB` (opaque) or `#AARRGGBB`.
    pub fn parse_hex(value: &str) -> Option<Color> {
        let hex = value.trim().strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let bits = u32::from_str_radix(hex, 16).ok()?;
        match hex.len() {
            6 => Some(Color(0xFF00_0000 | bits)),
            8 => Some(Color(bits)),
            _ => None,
        }
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Color(argb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse_hex("#F0E9E1"), Some(Color::LIGHT_GRAY));
        assert_eq!(Color::parse_hex("#80ff0000"), Some(Color(0x80FF_0000)));
        assert_eq!(Color::parse_hex("F0E9E1"), None);
        assert_eq!(Color::parse_hex("#F0E9"), None);
        assert_eq!(Color::parse_hex("#GGGGGG"), None);
    }

    #[test]
    fn test_components() {
        let c = Color::from_argb(0xFF, 0xF0, 0xE9, 0xE1);
        assert_eq!(c, Color::LIGHT_GRAY);
        assert_eq!(c.alpha(), 0xFF);
        assert_eq!(Color::TRANSPARENT.alpha(), 0);
    }
}
