//! Bundled self-check suite
//!
//! Exercises the harness end to end on whatever display the runner is
//! configured for. Reference images live in `runner/resources`.

use embedded_graphics::prelude::{Point as EgPoint, Primitive, Size as EgSize};
use embedded_graphics::primitives::{Line, Rectangle};
use embedded_graphics::Drawable;
use gfx_testing::{
    check_eq, check_mem, ensure, register_tests, BitmapFormat, Color, Framebuffer, Point, Rect,
    TestContext, TestRegistry, TestResult, WithMessage,
};

const RED_SQUARE: u32 = 1;
const CHECKER: u32 = 2;
const BLANK: u32 = 3;

pub fn registry() -> TestRegistry {
    let mut registry = TestRegistry::new();
    geometry::register(&mut registry);
    color::register(&mut registry);
    shapes::register(&mut registry);
    screen::register(&mut registry);
    registry
}

mod geometry {
    use super::*;

    pub fn register(registry: &mut TestRegistry) {
        register_tests!(registry, standardize_flips_negative_axes, center_point_rounds_down);
    }

    fn standardize_flips_negative_axes(_: &mut Framebuffer, _: &mut TestContext<'_>) -> TestResult {
        check_eq(Rect::new(0, 0, 10, 10).standardize(), Rect::new(0, 0, 10, 10))?;
        check_eq(Rect::new(0, 0, 10, -10).standardize(), Rect::new(0, 10, 10, 10))?;
        check_eq(Rect::new(0, 0, -10, 10).standardize(), Rect::new(10, 0, 10, 10))?;
        check_eq(Rect::new(0, 0, -10, -10).standardize(), Rect::new(10, 10, 10, 10))?;
        let once = Rect::new(7, -3, -5, -9).standardize();
        check_eq(once.standardize(), once)
    }

    fn center_point_rounds_down(_: &mut Framebuffer, _: &mut TestContext<'_>) -> TestResult {
        check_eq(Rect::new(0, 0, 10, 10).center_point(), Point::new(5, 5))?;
        check_eq(Rect::new(0, 0, 4, 4).center_point(), Point::new(2, 2))?;
        check_eq(Rect::new(0, 0, 3, 3).center_point(), Point::new(1, 1))
    }
}

mod color {
    use super::*;

    pub fn register(registry: &mut TestRegistry) {
        register_tests!(registry, rgba8_reduces_to_two_bits, alpha_is_part_of_equality);
    }

    fn rgba8_reduces_to_two_bits(_: &mut Framebuffer, _: &mut TestContext<'_>) -> TestResult {
        check_eq(Color::from_rgba8(255, 0, 0, 255), Color::RED)?;
        check_eq(Color::from_rgba8(0x7F, 0x80, 0xC0, 0xFF), Color::from_argb(3, 1, 2, 3))?;
        check_eq(u32::from_be_bytes(Color::RED.to_rgba8()), 0xFF00_00FF)
            .with_message(|| "red does not expand to full intensity".to_owned())
    }

    fn alpha_is_part_of_equality(fb: &mut Framebuffer, ctx: &mut TestContext<'_>) -> TestResult {
        let faded = Color::from_argb(1, 3, 0, 0);
        fb.set_pixel(Point::new(0, 0), faded);
        ctx.check_pixel(fb, Point::new(0, 0), faded)?;
        ensure!(!ctx.comparator(fb).pixel_equals(Point::new(0, 0), Color::RED));
        Ok(())
    }
}

mod shapes {
    use super::*;

    pub fn register(registry: &mut TestRegistry) {
        register_tests!(
            registry,
            red_square_matches_reference,
            flipped_rect_addresses_same_region,
            checker_pattern,
            horizontal_line_bytes
        );
    }

    fn red_square_matches_reference(fb: &mut Framebuffer, ctx: &mut TestContext<'_>) -> TestResult {
        ctx.map_resource("red_square.ppm", RED_SQUARE)?;
        ctx.set_fill_color(Color::RED);
        Rectangle::new(EgPoint::new(20, 30), EgSize::new(10, 10))
            .into_styled(ctx.fill_style())
            .draw(fb)
            .ok();
        ctx.check_subscreen(fb, Rect::new(20, 30, 10, 10), RED_SQUARE)?;
        ctx.check_pixel(fb, Point::new(30, 30), Color::WHITE)
    }

    // Relies on the mapping made by the previous test.
    fn flipped_rect_addresses_same_region(
        fb: &mut Framebuffer,
        ctx: &mut TestContext<'_>,
    ) -> TestResult {
        ctx.set_fill_color(Color::RED);
        Rectangle::new(EgPoint::new(50, 50), EgSize::new(10, 10))
            .into_styled(ctx.fill_style())
            .draw(fb)
            .ok();
        ctx.check_subscreen(fb, Rect::new(40, 40, -10, -10), RED_SQUARE)?;
        ctx.check_subscreen(fb, Rect::new(50, 40, 10, -10), RED_SQUARE)
    }

    fn checker_pattern(fb: &mut Framebuffer, ctx: &mut TestContext<'_>) -> TestResult {
        ctx.map_resource("checker.pbm", CHECKER)?;
        for y in 0..4i16 {
            for x in 0..4i16 {
                if (x ^ y) & 1 == 0 {
                    fb.set_pixel(Point::new(x, y), Color::BLACK);
                }
            }
        }
        ctx.check_subscreen(fb, Rect::new(0, 0, 4, 4), CHECKER)?;

        let palette = ctx.load_image_ex(CHECKER, BitmapFormat::Bit1Palette)?;
        check_eq(palette.palette().len(), 2)?;
        check_eq(palette.pixel(1, 0).unwrap_or(Color::CLEAR), Color::WHITE)
    }

    fn horizontal_line_bytes(fb: &mut Framebuffer, _: &mut TestContext<'_>) -> TestResult {
        Line::new(EgPoint::new(2, 5), EgPoint::new(5, 5))
            .into_styled(embedded_graphics::primitives::PrimitiveStyle::with_stroke(
                Color::BLUE,
                1,
            ))
            .draw(fb)
            .ok();
        let row = fb.row(5).unwrap_or_default();
        let w = Color::WHITE.argb;
        let b = Color::BLUE.argb;
        check_mem(row.get(..8).unwrap_or_default(), &[w, w, b, b, b, b, w, w])
    }
}

mod screen {
    use super::*;

    pub fn register(registry: &mut TestRegistry) {
        register_tests!(registry, fresh_screen_is_blank);
    }

    fn fresh_screen_is_blank(fb: &mut Framebuffer, ctx: &mut TestContext<'_>) -> TestResult {
        let name = format!("blank_{}x{}.pbm", fb.width(), fb.height());
        ctx.map_resource(&name, BLANK)?;
        ctx.check_screen(fb, BLANK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfx_testing::{displays, DirAssets, ResourceMap, Runner};

    #[test]
    fn suite_passes_on_every_display() {
        let registry = registry();
        for spec in displays::ALL.iter().copied() {
            let resources = ResourceMap::new(DirAssets::new(crate::config::DEFAULT_RESOURCES));
            let mut runner = Runner::new(spec, resources);
            for outcome in runner.run_all(&registry) {
                assert!(
                    outcome.passed(),
                    "{} on {}: {}",
                    outcome.record,
                    spec.name,
                    outcome.result.unwrap_err()
                );
            }
        }
    }

    #[test]
    fn names_follow_module_path() {
        let registry = registry();
        assert!(registry
            .records()
            .iter()
            .any(|r| r.to_string() == "gfx_runner::suite::shapes::checker_pattern"));
    }
}
