//! Packed 8-bit ARGB color
//!
//! Each pixel of the framebuffer is one byte laid out as `0bAARRGGBB`: two bits
//! per channel, alpha in the top bits. Colors compare by their packed byte, so
//! two colors that differ only in alpha are different.

use core::fmt;

use embedded_graphics::pixelcolor::raw::{RawData, RawU8};
use embedded_graphics::pixelcolor::PixelColor;

/// A packed 2-bit-per-channel ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// The packed `0bAARRGGBB` byte
    pub argb: u8,
}

impl Color {
    /// Fully transparent
    pub const CLEAR: Self = Self::from_argb(0, 0, 0, 0);
    /// Opaque black
    pub const BLACK: Self = Self::from_argb(3, 0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::from_argb(3, 3, 3, 3);
    /// Opaque light gray
    pub const LIGHT_GRAY: Self = Self::from_argb(3, 2, 2, 2);
    /// Opaque dark gray
    pub const DARK_GRAY: Self = Self::from_argb(3, 1, 1, 1);
    /// Opaque red
    pub const RED: Self = Self::from_argb(3, 3, 0, 0);
    /// Opaque green
    pub const GREEN: Self = Self::from_argb(3, 0, 3, 0);
    /// Opaque blue
    pub const BLUE: Self = Self::from_argb(3, 0, 0, 3);
    /// Opaque yellow
    pub const YELLOW: Self = Self::from_argb(3, 3, 3, 0);

    /// Wrap a packed `0bAARRGGBB` byte.
    pub const fn from_packed(argb: u8) -> Self {
        Self { argb }
    }

    /// Pack four 2-bit channels. Bits above the low two are discarded.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self {
            argb: ((a & 0b11) << 6) | ((r & 0b11) << 4) | ((g & 0b11) << 2) | (b & 0b11),
        }
    }

    /// Reduce 8-bit channels to 2 bits each by keeping their top bits.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_argb(a >> 6, r >> 6, g >> 6, b >> 6)
    }

    /// Alpha channel, 0..=3
    pub const fn a(self) -> u8 {
        self.argb >> 6
    }

    /// Red channel, 0..=3
    pub const fn r(self) -> u8 {
        (self.argb >> 4) & 0b11
    }

    /// Green channel, 0..=3
    pub const fn g(self) -> u8 {
        (self.argb >> 2) & 0b11
    }

    /// Blue channel, 0..=3
    pub const fn b(self) -> u8 {
        self.argb & 0b11
    }

    /// `true` when the alpha channel is at its maximum.
    pub const fn is_opaque(self) -> bool {
        self.a() == 3
    }

    /// Expand to 8-bit `[r, g, b, a]`, mapping 0..=3 onto 0..=255.
    // SAFETY: every channel is at most 3, and 3 * 85 = 255 fits in u8.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.r() * 85, self.g() * 85, self.b() * 85, self.a() * 85]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color(r={}, g={}, b={}, a={} / 0x{:02X})",
            self.r(),
            self.g(),
            self.b(),
            self.a(),
            self.argb
        )
    }
}

impl PixelColor for Color {
    type Raw = RawU8;
}

impl From<RawU8> for Color {
    fn from(raw: RawU8) -> Self {
        Self::from_packed(raw.into_inner())
    }
}

impl From<Color> for RawU8 {
    fn from(color: Color) -> Self {
        RawU8::new(color.argb)
    }
}
