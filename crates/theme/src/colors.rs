/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BACKGROUND: Self = Self::rgb8(0x0f, 0x11, 0x15);
    pub const BORDER:     Self = Self::rgb8(0x2a, 0x2f, 0x3a);
    pub const GRID:       Self = Self::rgb8(0x1c, 0x20, 0x29);
    pub const TEXT:       Self = Self::rgb8(0x9a, 0xa0, 0xaa);
    pub const TITLE:      Self = Self::rgb8(0xd7, 0xdd, 0xe7);
    pub const LINE:       Self = Self::rgb8(0x6f, 0xa8, 0xff);
    pub const FILL:       Self = Self::rgb8(0x26, 0x4b, 0x8a);

    /// Opaque colour from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self::rgb8(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
            8 => Some(
                Self::rgb8(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)
                    .with_alpha(byte(&hex[6..8])? as f32 / 255.0),
            ),
            _ => None,
        }
    }

    /// Convert to an [`iced::Color`] for use in Iced widgets and canvases.
    #[inline]
    pub fn to_iced(self) -> iced::Color {
        iced::Color::from_rgba(self.r, self.g, self.b, self.a)
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}
