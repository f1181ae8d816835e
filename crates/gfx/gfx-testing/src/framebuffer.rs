//! 8-bit in-memory framebuffer
//!
//! One byte per pixel in the packed [`Color`] layout, rows stored top to
//! bottom with no padding. Tests draw into it through `embedded-graphics`
//! and assertions read it back byte by byte.

use std::path::Path;

use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size as EgSize};
use gfx_types::{Color, Point, Rect, ScreenSpec};

/// Pixel buffer of one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u16,
    height: u16,
    bytes: Vec<u8>,
}

impl Framebuffer {
    /// Create a framebuffer the size of `spec`, filled with white.
    pub fn new(spec: &ScreenSpec) -> Self {
        Self::with_size(spec.width, spec.height)
    }

    /// Create a `width` × `height` framebuffer filled with white.
    ///
    /// Dimensions are clamped to `i16::MAX` so every pixel is addressable.
    pub fn with_size(width: u16, height: u16) -> Self {
        let width = width.min(i16::MAX.unsigned_abs());
        let height = height.min(i16::MAX.unsigned_abs());
        Self {
            width,
            height,
            bytes: vec![Color::WHITE.argb; usize::from(width).saturating_mul(usize::from(height))],
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bytes per row
    pub fn row_stride(&self) -> usize {
        usize::from(self.width)
    }

    /// The full-screen rectangle.
    // Dimensions are clamped to i16::MAX on construction.
    #[allow(clippy::cast_possible_wrap)]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i16, self.height as i16)
    }

    /// Raw pixel bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable raw pixel bytes, row-major
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Byte offset of `p`, or `None` if it lies off-screen.
    // SAFETY: both coordinates are checked against the dimensions first, so
    // y * width + x stays below width * height.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_sign_loss)]
    pub fn offset_of(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        if x >= usize::from(self.width) || y >= usize::from(self.height) {
            return None;
        }
        Some(y * usize::from(self.width) + x)
    }

    /// Color at `p`, or `None` if it lies off-screen.
    pub fn pixel(&self, p: Point) -> Option<Color> {
        let offset = self.offset_of(p)?;
        self.bytes.get(offset).copied().map(Color::from_packed)
    }

    /// Set the pixel at `p`; off-screen writes are ignored.
    pub fn set_pixel(&mut self, p: Point, color: Color) {
        if let Some(byte) = self.offset_of(p).and_then(|o| self.bytes.get_mut(o)) {
            *byte = color.argb;
        }
    }

    /// One row of pixel bytes.
    pub fn row(&self, y: u16) -> Option<&[u8]> {
        let start = usize::from(y).checked_mul(self.row_stride())?;
        let end = start.checked_add(self.row_stride())?;
        self.bytes.get(start..end)
    }

    /// Fill the whole screen with `color`.
    pub fn fill(&mut self, color: Color) {
        self.bytes.fill(color.argb);
    }

    /// Fill with white.
    pub fn clear(&mut self) {
        self.fill(Color::WHITE);
    }

    /// Expand to 8-bit RGBA for saving or diffing.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut img = image::RgbaImage::new(u32::from(self.width), u32::from(self.height));
        for (dst, src) in img.pixels_mut().zip(&self.bytes) {
            *dst = image::Rgba(Color::from_packed(*src).to_rgba8());
        }
        img
    }

    /// Save the framebuffer as a PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        self.to_rgba_image()
            .save_with_format(path, image::ImageFormat::Png)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Color;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (i16::try_from(point.x), i16::try_from(point.y)) else {
                continue;
            };
            self.set_pixel(Point::new(x, y), color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> EgSize {
        EgSize::new(u32::from(self.width), u32::from(self.height))
    }
}
