//! Per-test context: resources, decoded images and drawing state

use std::rc::Rc;

use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder};
use gfx_resources::{Bitmap, BitmapFormat, BitmapPool, ResourceMap};
use gfx_types::{Color, Point, Rect};

use crate::assert::{check_with, Failure, TestResult};
use crate::compare::Comparator;
use crate::framebuffer::Framebuffer;

/// Everything a test body needs besides the framebuffer.
///
/// The resource table is borrowed from the runner, so mappings outlive the
/// test. Decoded bitmaps belong to the context and are freed with it.
#[derive(Debug)]
pub struct TestContext<'r> {
    resources: &'r mut ResourceMap,
    pool: BitmapPool,
    fill_color: Color,
    stroke_color: Color,
    stroke_width: u8,
}

impl<'r> TestContext<'r> {
    /// Fresh context over the shared resource table.
    ///
    /// Drawing state starts as black fill, black 1-pixel stroke.
    pub fn new(resources: &'r mut ResourceMap) -> Self {
        Self {
            resources,
            pool: BitmapPool::new(),
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            stroke_width: 1,
        }
    }

    // ── Resources ────────────────────────────────────────────────────────────

    /// Map asset `name` to resource `id`, failing if the asset does not exist.
    #[track_caller]
    pub fn map_resource(&mut self, name: &str, id: u32) -> TestResult {
        let mapped = self.resources.map_resource(name, id);
        check_with(mapped, || format!("Could not load resource \"{name}\""))
    }

    /// The shared resource table
    pub fn resources(&self) -> &ResourceMap {
        &*self.resources
    }

    /// Decode resource `id` as an 8-bit bitmap.
    #[track_caller]
    pub fn load_image(&self, id: u32) -> TestResult<Rc<Bitmap>> {
        self.load_image_ex(id, BitmapFormat::Bit8)
    }

    /// Decode resource `id` in `format`.
    #[track_caller]
    pub fn load_image_ex(&self, id: u32, format: BitmapFormat) -> TestResult<Rc<Bitmap>> {
        match self.pool.load_image_ex(&*self.resources, id, format) {
            Some(bitmap) => Ok(bitmap),
            None => Err(Failure::new(format!("Could not load image from resource {id}"))),
        }
    }

    /// Comparison view of `fb` against this context's resources.
    pub fn comparator<'a>(&'a self, fb: &'a Framebuffer) -> Comparator<'a> {
        Comparator::new(fb, &*self.resources, &self.pool)
    }

    // ── Screen assertions ────────────────────────────────────────────────────

    /// Fail unless the pixel at `p` is exactly `color`.
    #[track_caller]
    pub fn check_pixel(&self, fb: &Framebuffer, p: Point, color: Color) -> TestResult {
        let cmp = self.comparator(fb);
        check_with(cmp.pixel_equals(p, color), || cmp.msg_pixel(p, color))
    }

    /// Fail unless `rect` on screen equals resource `id`.
    #[track_caller]
    pub fn check_subscreen(&self, fb: &Framebuffer, rect: Rect, id: u32) -> TestResult {
        let cmp = self.comparator(fb);
        check_with(cmp.subscreen_equals(rect, id), || cmp.msg_subscreen(rect, id))
    }

    /// Fail unless the whole screen equals resource `id`.
    #[track_caller]
    pub fn check_screen(&self, fb: &Framebuffer, id: u32) -> TestResult {
        let cmp = self.comparator(fb);
        check_with(cmp.screen_equals(id), || cmp.msg_screen(id))
    }

    // ── Drawing state ────────────────────────────────────────────────────────

    /// Current fill color
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Set the fill color used by [`fill_style`](Self::fill_style).
    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    /// Current stroke color
    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    /// Set the stroke color used by [`stroke_style`](Self::stroke_style).
    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    /// Current stroke width in pixels
    pub fn stroke_width(&self) -> u8 {
        self.stroke_width
    }

    /// Set the stroke width used by [`stroke_style`](Self::stroke_style).
    pub fn set_stroke_width(&mut self, width: u8) {
        self.stroke_width = width;
    }

    /// Solid fill in the current fill color.
    pub fn fill_style(&self) -> PrimitiveStyle<Color> {
        PrimitiveStyle::with_fill(self.fill_color)
    }

    /// Outline in the current stroke color and width.
    pub fn stroke_style(&self) -> PrimitiveStyle<Color> {
        PrimitiveStyleBuilder::new()
            .stroke_color(self.stroke_color)
            .stroke_width(u32::from(self.stroke_width))
            .build()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use embedded_graphics::prelude::{Point as EgPoint, Primitive, Size as EgSize};
    use embedded_graphics::primitives::Rectangle;
    use embedded_graphics::Drawable;
    use gfx_resources::MemoryAssets;

    // 2x2 solid green
    const GREEN: &[u8] = b"P3 2 2 255  0 255 0  0 255 0  0 255 0  0 255 0";

    fn table() -> ResourceMap {
        ResourceMap::new(MemoryAssets::new().with_asset("green.ppm", GREEN))
    }

    #[test]
    fn map_resource_failure_names_the_asset() {
        let mut map = table();
        let mut ctx = TestContext::new(&mut map);
        ctx.map_resource("green.ppm", 1).unwrap();
        let err = ctx.map_resource("blue.ppm", 2).unwrap_err();
        assert_eq!(err.message(), "Could not load resource \"blue.ppm\"");
        assert_eq!(err.file(), file!());
    }

    #[test]
    fn mappings_outlive_the_context() {
        let mut map = table();
        {
            let mut ctx = TestContext::new(&mut map);
            ctx.map_resource("green.ppm", 5).unwrap();
            ctx.load_image(5).unwrap();
        }
        assert_eq!(map.resolve(5), Some("green.ppm"));
    }

    #[test]
    fn load_failure_names_the_id() {
        let mut map = table();
        let ctx = TestContext::new(&mut map);
        let err = ctx.load_image(3).unwrap_err();
        assert_eq!(err.message(), "Could not load image from resource 3");
    }

    #[test]
    fn screen_checks_through_context() {
        let mut map = table();
        let mut ctx = TestContext::new(&mut map);
        ctx.map_resource("green.ppm", 1).unwrap();

        let mut fb = Framebuffer::with_size(2, 2);
        ctx.set_fill_color(Color::GREEN);
        Rectangle::new(EgPoint::new(0, 0), EgSize::new(2, 2))
            .into_styled(ctx.fill_style())
            .draw(&mut fb)
            .unwrap();

        ctx.check_pixel(&fb, Point::new(1, 1), Color::GREEN).unwrap();
        ctx.check_subscreen(&fb, Rect::new(0, 0, 2, 2), 1).unwrap();
        ctx.check_screen(&fb, 1).unwrap();

        fb.set_pixel(Point::new(1, 0), Color::RED);
        let err = ctx.check_screen(&fb, 1).unwrap_err();
        assert!(err.message().contains("1 pixel(s) differ, first at Point(1, 0)"));
        let err = ctx.check_pixel(&fb, Point::new(1, 0), Color::GREEN).unwrap_err();
        assert!(err.message().starts_with("Pixel Point(1, 0)"));
    }

    #[test]
    fn drawing_state_defaults_and_setters() {
        let mut map = table();
        let mut ctx = TestContext::new(&mut map);
        assert_eq!(ctx.fill_color(), Color::BLACK);
        assert_eq!(ctx.stroke_color(), Color::BLACK);
        assert_eq!(ctx.stroke_width(), 1);
        ctx.set_fill_color(Color::BLUE);
        ctx.set_stroke_color(Color::GREEN);
        ctx.set_stroke_width(4);
        assert_eq!(ctx.fill_color(), Color::BLUE);
        assert_eq!(ctx.stroke_color(), Color::GREEN);
        assert_eq!(ctx.stroke_width(), 4);
    }

    #[test]
    fn stroke_style_follows_state() {
        let mut map = table();
        let mut ctx = TestContext::new(&mut map);
        ctx.set_stroke_color(Color::RED);
        ctx.set_stroke_width(3);
        let style = ctx.stroke_style();
        assert_eq!(style.stroke_color, Some(Color::RED));
        assert_eq!(style.stroke_width, 3);
        assert_eq!(style.fill_color, None);
        assert_eq!(ctx.fill_style().fill_color, Some(Color::BLACK));
    }
}
