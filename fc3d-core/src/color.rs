/// RGB colours for materials and lights
use serde::{Deserialize, Serialize};

/// Linear RGB colour with components in [0, 1].
///
/// Serialized as a packed `0xRRGGBB` integer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a colour from a packed `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    pub fn to_hex(&self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn rgba(&self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }

    /// Scale every channel, clamping the result to [0, 1]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
        }
    }

    /// 8-bit channels, for terminal true-colour output
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let hex = self.to_hex();
        ((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_green() {
        let green = Color::from_hex(0x00ff00);
        assert!(green.r.abs() < 1e-6);
        assert!((green.g - 1.0).abs() < 1e-6);
        assert!(green.b.abs() < 1e-6);
    }

    #[test]
    fn test_hex_survives_conversion() {
        for hex in [0xcccc00, 0xaaaaaa, 0x333333, 0xff0000] {
            assert_eq!(Color::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn test_scaled_clamps() {
        let grey = Color::from_hex(0x808080).scaled(4.0);
        assert_eq!(grey, Color::WHITE);
        assert_eq!(Color::from_hex(0xff0000).to_rgb8(), (255, 0, 0));
    }
}
