//! Immutable decoded bitmaps
//!
//! Pixel data is stored row by row, each row padded to a whole byte. Packed
//! formats put the leftmost pixel in the most significant bits.
//!
//! | Format        | Bits/pixel | Pixel value                           |
//! |---------------|-----------:|---------------------------------------|
//! | `Bit1`        | 1          | 1 = white, 0 = black                  |
//! | `Bit8`        | 8          | packed `0bAARRGGBB` color             |
//! | `Bit1Palette` | 1          | index into a palette of ≤ 2 colors    |
//! | `Bit2Palette` | 2          | index into a palette of ≤ 4 colors    |
//! | `Bit4Palette` | 4          | index into a palette of ≤ 16 colors   |

use core::fmt;

use gfx_types::{Color, Size};
use image::RgbaImage;

use crate::error::ResourceError;

/// Pixel format of a decoded bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitmapFormat {
    /// 1 bit per pixel, black and white
    Bit1,
    /// 8 bits per pixel, the framebuffer's native format
    #[default]
    Bit8,
    /// 1 bit per pixel, 2-entry palette
    Bit1Palette,
    /// 2 bits per pixel, 4-entry palette
    Bit2Palette,
    /// 4 bits per pixel, 16-entry palette
    Bit4Palette,
}

impl BitmapFormat {
    /// Bits used by one pixel.
    pub const fn bits_per_pixel(self) -> u8 {
        match self {
            Self::Bit1 | Self::Bit1Palette => 1,
            Self::Bit2Palette => 2,
            Self::Bit4Palette => 4,
            Self::Bit8 => 8,
        }
    }

    /// Bytes per row for an image `width` pixels wide.
    pub const fn row_stride(self, width: u16) -> usize {
        (width as usize)
            .saturating_mul(self.bits_per_pixel() as usize)
            .div_ceil(8)
    }
}

impl fmt::Display for BitmapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bit1 => "1-bit",
            Self::Bit8 => "8-bit",
            Self::Bit1Palette => "1-bit palette",
            Self::Bit2Palette => "2-bit palette",
            Self::Bit4Palette => "4-bit palette",
        };
        f.write_str(name)
    }
}

/// A decoded, read-only image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    format: BitmapFormat,
    width: u16,
    height: u16,
    row_stride: usize,
    data: Box<[u8]>,
    palette: Box<[Color]>,
}

/// Byte offset and bit shift of one pixel inside the pixel data.
#[derive(Clone, Copy)]
struct Slot {
    byte: usize,
    shift: u8,
    mask: u8,
}

impl Bitmap {
    /// Convert decoded RGBA8 pixels into `format`.
    ///
    /// Channels are reduced to 2 bits each. For [`BitmapFormat::Bit1`] a pixel
    /// is white when its alpha, red, green and blue are all in the upper half.
    /// Palette formats collect distinct colors in scan order and fail when
    /// there are more than the format can index.
    pub fn from_rgba(image: &RgbaImage, format: BitmapFormat) -> Result<Self, ResourceError> {
        let (w, h) = image.dimensions();
        let too_large = || ResourceError::TooLarge {
            width: w,
            height: h,
        };
        let width = u16::try_from(w).ok().filter(|v| *v <= i16::MAX as u16).ok_or_else(too_large)?;
        let height = u16::try_from(h).ok().filter(|v| *v <= i16::MAX as u16).ok_or_else(too_large)?;

        let row_stride = format.row_stride(width);
        let mut bitmap = Self {
            format,
            width,
            height,
            row_stride,
            data: vec![0; row_stride.saturating_mul(usize::from(height))].into_boxed_slice(),
            palette: Box::new([]),
        };

        let mut palette: Vec<Color> = Vec::new();
        let capacity = 1usize
            .checked_shl(u32::from(format.bits_per_pixel()))
            .unwrap_or(usize::MAX);
        for (x, y, px) in image.enumerate_pixels() {
            let [r, g, b, a] = px.0;
            let color = Color::from_rgba8(r, g, b, a);
            let value = match format {
                BitmapFormat::Bit8 => color.argb,
                BitmapFormat::Bit1 => u8::from(is_light(color)),
                _ => match palette.iter().position(|c| *c == color) {
                    Some(i) => index_to_u8(i),
                    None => {
                        palette.push(color);
                        index_to_u8(palette.len().saturating_sub(1))
                    }
                },
            };
            if palette.len() > capacity {
                return Err(ResourceError::TooManyColors {
                    colors: count_distinct(image),
                    format,
                });
            }
            // x < width and y < height come from the image itself.
            #[allow(clippy::cast_possible_truncation)]
            bitmap.store(x as u16, y as u16, value);
        }
        bitmap.palette = palette.into_boxed_slice();
        Ok(bitmap)
    }

    /// Pixel format tag
    pub fn format(&self) -> BitmapFormat {
        self.format
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Dimensions as a geometry [`Size`].
    // Dimensions are checked against i16::MAX on construction.
    #[allow(clippy::cast_possible_wrap)]
    pub fn size(&self) -> Size {
        Size::new(self.width as i16, self.height as i16)
    }

    /// Bytes per row of pixel data
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Raw pixel data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Palette of a palettized bitmap; empty otherwise
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Color of the pixel at `(x, y)`, or `None` if out of bounds.
    // SAFETY: slot shifts are below 8.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn pixel(&self, x: u16, y: u16) -> Option<Color> {
        let slot = self.slot(x, y)?;
        let value = (self.data.get(slot.byte)? >> slot.shift) & slot.mask;
        match self.format {
            BitmapFormat::Bit8 => Some(Color::from_packed(value)),
            BitmapFormat::Bit1 => Some(if value == 1 { Color::WHITE } else { Color::BLACK }),
            _ => self.palette.get(usize::from(value)).copied(),
        }
    }

    // SAFETY: x < width and y < height are checked first; y * stride + x * bpp / 8
    // is then bounded by the data length, which was allocated from the same values.
    #[allow(clippy::arithmetic_side_effects)]
    fn slot(&self, x: u16, y: u16) -> Option<Slot> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = usize::from(self.format.bits_per_pixel());
        let bit = usize::from(x) * bpp;
        let byte = usize::from(y) * self.row_stride + bit / 8;
        // Leftmost pixel in the most significant bits.
        #[allow(clippy::cast_possible_truncation)]
        let shift = (8 - bpp - bit % 8) as u8;
        let mask = if bpp == 8 { 0xFF } else { (1u8 << bpp) - 1 };
        Some(Slot { byte, shift, mask })
    }

    // SAFETY: slot shifts are below 8 and masks fit the pixel width.
    #[allow(clippy::arithmetic_side_effects)]
    fn store(&mut self, x: u16, y: u16, value: u8) {
        let Some(slot) = self.slot(x, y) else {
            return;
        };
        if let Some(byte) = self.data.get_mut(slot.byte) {
            *byte = (*byte & !(slot.mask << slot.shift)) | ((value & slot.mask) << slot.shift);
        }
    }
}

fn is_light(color: Color) -> bool {
    color.a() >= 2 && color.r() >= 2 && color.g() >= 2 && color.b() >= 2
}

// Palette indices never exceed 16 before the capacity check rejects the image.
#[allow(clippy::cast_possible_truncation)]
fn index_to_u8(index: usize) -> u8 {
    index as u8
}

fn count_distinct(image: &RgbaImage) -> usize {
    let mut seen = std::collections::HashSet::new();
    for px in image.pixels() {
        let [r, g, b, a] = px.0;
        seen.insert(Color::from_rgba8(r, g, b, a));
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn stripes(width: u32, height: u32, colors: &[Rgba<u8>]) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| colors[x as usize % colors.len()])
    }

    #[test]
    fn row_stride_rounds_up_to_bytes() {
        assert_eq!(BitmapFormat::Bit1.row_stride(9), 2);
        assert_eq!(BitmapFormat::Bit2Palette.row_stride(5), 2);
        assert_eq!(BitmapFormat::Bit4Palette.row_stride(3), 2);
        assert_eq!(BitmapFormat::Bit8.row_stride(144), 144);
    }

    #[test]
    fn bit8_keeps_packed_colors() {
        let img = stripes(3, 2, &[RED, WHITE, BLACK]);
        let bmp = Bitmap::from_rgba(&img, BitmapFormat::Bit8).unwrap();
        assert_eq!(bmp.size(), Size::new(3, 2));
        assert_eq!(bmp.data(), &[0xF0, 0xFF, 0xC0, 0xF0, 0xFF, 0xC0]);
        assert_eq!(bmp.pixel(0, 1), Some(Color::RED));
        assert_eq!(bmp.pixel(3, 0), None);
        assert!(bmp.palette().is_empty());
    }

    #[test]
    fn bit1_packs_msb_first() {
        let img = stripes(9, 1, &[WHITE, BLACK]);
        let bmp = Bitmap::from_rgba(&img, BitmapFormat::Bit1).unwrap();
        assert_eq!(bmp.row_stride(), 2);
        assert_eq!(bmp.data(), &[0b1010_1010, 0b1000_0000]);
        assert_eq!(bmp.pixel(8, 0), Some(Color::WHITE));
        assert_eq!(bmp.pixel(7, 0), Some(Color::BLACK));
    }

    #[test]
    fn bit1_treats_saturated_red_as_black() {
        let img = stripes(1, 1, &[RED]);
        let bmp = Bitmap::from_rgba(&img, BitmapFormat::Bit1).unwrap();
        assert_eq!(bmp.pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn palette_collects_colors_in_scan_order() {
        let img = stripes(5, 2, &[BLACK, RED, WHITE]);
        let bmp = Bitmap::from_rgba(&img, BitmapFormat::Bit2Palette).unwrap();
        assert_eq!(bmp.palette(), &[Color::BLACK, Color::RED, Color::WHITE]);
        for x in 0..5u16 {
            let expected = [Color::BLACK, Color::RED, Color::WHITE][usize::from(x) % 3];
            assert_eq!(bmp.pixel(x, 0), Some(expected));
            assert_eq!(bmp.pixel(x, 1), Some(expected));
        }
    }

    #[test]
    fn palette_overflow_is_an_error() {
        let img = stripes(3, 1, &[BLACK, RED, WHITE]);
        let err = Bitmap::from_rgba(&img, BitmapFormat::Bit1Palette).unwrap_err();
        assert!(matches!(
            err,
            ResourceError::TooManyColors { colors: 3, format: BitmapFormat::Bit1Palette }
        ));
    }

    #[test]
    fn transparent_pixels_keep_their_alpha() {
        let img = stripes(1, 1, &[Rgba([255, 0, 0, 0])]);
        let bmp = Bitmap::from_rgba(&img, BitmapFormat::Bit8).unwrap();
        assert_eq!(bmp.pixel(0, 0), Some(Color::from_argb(0, 3, 0, 0)));
    }
}
