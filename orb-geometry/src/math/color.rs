//! Linear RGB color blending for particle colors
//!
//! Colors are stored as three `f32` channels in `[0, 1]`. Hex values are taken
//! as-is (divided by 255) with no gamma conversion, matching what point-cloud
//! renderers expect for per-vertex color.

use bytemuck::{Pod, Zeroable};

use crate::error::OrbError;

/// RGB color with `f32` channels (POD, 12 bytes)
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a color from raw channels
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`
    pub fn parse_hex(s: &str) -> Result<Self, OrbError> {
        let digits = s.trim().trim_start_matches('#');
        let invalid = || OrbError::InvalidColor(s.to_string());
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            6 => Ok(Self::from_hex(value)),
            3 => {
                // Expand each nibble: 0xABC -> 0xAABBCC
                let r = (value >> 8) & 0xF;
                let g = (value >> 4) & 0xF;
                let b = value & 0xF;
                Ok(Self::from_hex((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11))
            }
            _ => Err(invalid()),
        }
    }

    /// Linear interpolation toward `other`, with `t` clamped to `[0, 1]`
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Multiply every channel by `factor`
    #[inline]
    pub fn scale(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }

    /// Componentwise multiply
    #[inline]
    pub fn mul(self, other: Self) -> Self {
        Self {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
        }
    }

    /// Clamp every channel to `[0, 1]` (NaN becomes 0)
    #[inline]
    pub fn clamped(self) -> Self {
        let c = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self {
            r: c(self.r),
            g: c(self.g),
            b: c(self.b),
        }
    }

    /// Channels as an array
    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// True if every channel is within `[0, 1]`
    pub fn is_normalized(self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }
}

/// Linear interpolation between two colors
#[inline]
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    a.lerp(b, t)
}

/// Weighted multiply blend: `weight = 0` returns `a`, `weight = 1` returns `a * b`
#[inline]
pub fn blend_color(a: Color, b: Color, weight: f32) -> Color {
    a.lerp(a.mul(b), weight)
}

/// Named palette entries shared across shapes
pub mod palette {
    use super::Color;

    pub const GOLD: Color = Color::from_hex(0xFFD700);
    pub const DEEP_GOLD: Color = Color::from_hex(0xFFA500);
    pub const AMBER: Color = Color::from_hex(0xFFBF00);
    pub const BRONZE: Color = Color::from_hex(0xCD7F32);
    pub const SILVER: Color = Color::from_hex(0xC0C0C0);
    pub const PALE_BLUE: Color = Color::from_hex(0xAFEEEE);
    pub const CYAN: Color = Color::from_hex(0x22D3EE);
    pub const LIGHT_CYAN: Color = Color::from_hex(0x67E8F9);
    pub const ELECTRIC_BLUE: Color = Color::from_hex(0x3B82F6);
    pub const DEEP_BLUE: Color = Color::from_hex(0x1E40AF);
    pub const TEAL: Color = Color::from_hex(0x14B8A6);
    pub const VIOLET: Color = Color::from_hex(0x8B5CF6);
    pub const EMERALD: Color = Color::from_hex(0x10B981);

    /// Fallback sphere palette used when the caller supplies none
    pub const FALLBACK: Color = Color::from_hex(0xCCCCCC);
}
