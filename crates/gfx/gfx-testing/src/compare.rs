//! Framebuffer comparison against colors and reference bitmaps
//!
//! Region comparisons are exact: the standardized rectangle must lie fully on
//! screen and have the same dimensions as the reference image, and every
//! packed pixel byte must match. There is no clipping and no tolerance.

use core::fmt;

use gfx_resources::{BitmapPool, ResourceMap};
use gfx_types::{Color, Point, Rect, Size};

use crate::framebuffer::Framebuffer;

/// Read-only view used to compare a framebuffer with expectations.
#[derive(Clone, Copy)]
pub struct Comparator<'a> {
    fb: &'a Framebuffer,
    resources: &'a ResourceMap,
    pool: &'a BitmapPool,
}

/// Result of comparing a screen region with a reference image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionDiff {
    /// Every pixel matches
    Match,
    /// The reference image could not be loaded
    LoadFailed,
    /// The region reaches outside the framebuffer
    OffScreen {
        /// Framebuffer dimensions
        screen: Size,
    },
    /// Region and image differ in size; no pixels were compared
    SizeMismatch {
        /// Size of the standardized region
        region: Size,
        /// Size of the reference image
        image: Size,
    },
    /// At least one pixel differs
    Pixels {
        /// Screen position of the first differing pixel, in scan order
        first: Point,
        /// Framebuffer color at `first`
        actual: Color,
        /// Image color at `first`
        expected: Color,
        /// Number of differing pixels
        count: usize,
    },
}

impl RegionDiff {
    /// `true` for [`RegionDiff::Match`].
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

impl fmt::Display for RegionDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match => f.write_str("region matches"),
            Self::LoadFailed => f.write_str("reference image could not be loaded"),
            Self::OffScreen { screen } => write!(f, "region is not inside the screen ({screen})"),
            Self::SizeMismatch { region, image } => {
                write!(f, "size mismatch \tActual: {region} \tExpected: {image}")
            }
            Self::Pixels {
                first,
                actual,
                expected,
                count,
            } => write!(
                f,
                "{count} pixel(s) differ, first at {first} \tActual: {actual} \tExpected: {expected}"
            ),
        }
    }
}

impl<'a> Comparator<'a> {
    /// Compare `fb` using images from `resources`, decoded through `pool`.
    pub fn new(fb: &'a Framebuffer, resources: &'a ResourceMap, pool: &'a BitmapPool) -> Self {
        Self {
            fb,
            resources,
            pool,
        }
    }

    /// `true` if the pixel at `p` is exactly `color`. Off-screen is never equal.
    pub fn pixel_equals(&self, p: Point, color: Color) -> bool {
        self.fb.pixel(p) == Some(color)
    }

    /// `true` if `rect` on screen equals resource `id` pixel for pixel.
    pub fn subscreen_equals(&self, rect: Rect, id: u32) -> bool {
        self.diff_subscreen(rect, id).is_match()
    }

    /// `true` if the whole screen equals resource `id`.
    pub fn screen_equals(&self, id: u32) -> bool {
        self.subscreen_equals(self.fb.bounds(), id)
    }

    /// Detailed comparison of `rect` with resource `id` as an 8-bit bitmap.
    pub fn diff_subscreen(&self, rect: Rect, id: u32) -> RegionDiff {
        let Some(bitmap) = self.pool.load_image(self.resources, id) else {
            return RegionDiff::LoadFailed;
        };
        let region = rect.standardize();
        if region.size != bitmap.size() {
            return RegionDiff::SizeMismatch {
                region: region.size,
                image: bitmap.size(),
            };
        }
        let screen = self.fb.bounds();
        if !screen.contains_rect(&region) {
            return RegionDiff::OffScreen {
                screen: screen.size,
            };
        }

        let mut first = None;
        let mut count = 0usize;
        for y in 0..bitmap.height() {
            let Some(row) = offset(region.origin.y, y) else {
                return RegionDiff::OffScreen {
                    screen: screen.size,
                };
            };
            for x in 0..bitmap.width() {
                let Some(col) = offset(region.origin.x, x) else {
                    return RegionDiff::OffScreen {
                        screen: screen.size,
                    };
                };
                let at = Point::new(col, row);
                let actual = self.fb.pixel(at);
                let expected = bitmap.pixel(x, y);
                if actual != expected {
                    count = count.saturating_add(1);
                    if first.is_none() {
                        first = actual.zip(expected).map(|(a, e)| (at, a, e));
                    }
                }
            }
        }
        match first {
            Some((first, actual, expected)) => RegionDiff::Pixels {
                first,
                actual,
                expected,
                count,
            },
            None => RegionDiff::Match,
        }
    }

    /// Diagnostic for a failed [`pixel_equals`](Self::pixel_equals).
    pub fn msg_pixel(&self, p: Point, color: Color) -> String {
        match self.fb.pixel(p) {
            Some(actual) => format!("Pixel {p} \tActual: {actual} \tExpected: {color}"),
            None => format!(
                "Pixel {p} is off-screen ({}x{}) \tExpected: {color}",
                self.fb.width(),
                self.fb.height()
            ),
        }
    }

    /// Diagnostic for a failed [`subscreen_equals`](Self::subscreen_equals).
    ///
    /// Shows `rect` as passed, before standardization.
    pub fn msg_subscreen(&self, rect: Rect, id: u32) -> String {
        match self.diff_subscreen(rect, id) {
            RegionDiff::LoadFailed => format!("Could not load image from resource {id}"),
            diff => format!("Subscreen {rect} vs resource {id}: {diff}"),
        }
    }

    /// Diagnostic for a failed [`screen_equals`](Self::screen_equals).
    pub fn msg_screen(&self, id: u32) -> String {
        match self.diff_subscreen(self.fb.bounds(), id) {
            RegionDiff::LoadFailed => format!("Could not load image from resource {id}"),
            diff => format!("Screen vs resource {id}: {diff}"),
        }
    }
}

/// Screen coordinate `index` pixels past `start`, if it is representable.
fn offset(start: i16, index: u16) -> Option<i16> {
    i16::try_from(index).ok().and_then(|i| start.checked_add(i))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use gfx_resources::MemoryAssets;

    // 2x2: red red / red blue
    const QUAD: &[u8] = b"P3 2 2 255  255 0 0  255 0 0  255 0 0  0 0 255";
    // 3x1: white white white
    const ROW: &[u8] = b"P1 3 1  0 0 0";
    // 10x1: white
    const WIDE: &[u8] = b"P1 10 1  0 0 0 0 0 0 0 0 0 0";

    fn resources() -> ResourceMap {
        let mut map = ResourceMap::new(
            MemoryAssets::new()
                .with_asset("quad.ppm", QUAD)
                .with_asset("row.pbm", ROW),
        );
        assert!(map.map_resource("quad.ppm", 1));
        assert!(map.map_resource("row.pbm", 2));
        map
    }

    fn framebuffer() -> Framebuffer {
        let mut fb = Framebuffer::with_size(4, 4);
        fb.set_pixel(Point::new(1, 1), Color::RED);
        fb.set_pixel(Point::new(2, 1), Color::RED);
        fb.set_pixel(Point::new(1, 2), Color::RED);
        fb.set_pixel(Point::new(2, 2), Color::BLUE);
        fb
    }

    #[test]
    fn pixel_equality_is_exact() {
        let (fb, map, pool) = (framebuffer(), resources(), BitmapPool::new());
        let cmp = Comparator::new(&fb, &map, &pool);
        assert!(cmp.pixel_equals(Point::new(1, 1), Color::RED));
        assert!(!cmp.pixel_equals(Point::new(1, 1), Color::from_argb(2, 3, 0, 0)));
        assert!(!cmp.pixel_equals(Point::new(9, 9), Color::WHITE));
        assert_eq!(
            cmp.msg_pixel(Point::new(0, 0), Color::RED),
            format!("Pixel Point(0, 0) \tActual: {} \tExpected: {}", Color::WHITE, Color::RED)
        );
        assert!(cmp.msg_pixel(Point::new(9, 9), Color::RED).contains("off-screen (4x4)"));
    }

    #[test]
    fn subscreen_matches_reference() {
        let (fb, map, pool) = (framebuffer(), resources(), BitmapPool::new());
        let cmp = Comparator::new(&fb, &map, &pool);
        assert!(cmp.subscreen_equals(Rect::new(1, 1, 2, 2), 1));
        // flipped rects standardize onto the same area
        assert!(cmp.subscreen_equals(Rect::new(-1, -1, -2, -2), 1));
        assert!(cmp.subscreen_equals(Rect::new(1, -1, 2, -2), 1));
        assert!(!cmp.subscreen_equals(Rect::new(3, 3, -2, -2), 1));
        assert!(cmp.subscreen_equals(Rect::new(0, 0, 3, 1), 2));
    }

    #[test]
    fn subscreen_reports_first_difference() {
        let (fb, map, pool) = (framebuffer(), resources(), BitmapPool::new());
        let cmp = Comparator::new(&fb, &map, &pool);
        let diff = cmp.diff_subscreen(Rect::new(0, 0, 2, 2), 1);
        assert_eq!(
            diff,
            RegionDiff::Pixels {
                first: Point::new(0, 0),
                actual: Color::WHITE,
                expected: Color::RED,
                count: 4,
            }
        );
        assert!(cmp
            .msg_subscreen(Rect::new(0, 0, 2, 2), 1)
            .starts_with("Subscreen Rect(0, 0, 2, 2) vs resource 1: 4 pixel(s) differ"));
    }

    #[test]
    fn size_mismatch_compares_nothing() {
        let (fb, map, pool) = (framebuffer(), resources(), BitmapPool::new());
        let cmp = Comparator::new(&fb, &map, &pool);
        assert_eq!(
            cmp.diff_subscreen(Rect::new(1, 1, 2, 3), 1),
            RegionDiff::SizeMismatch {
                region: Size::new(2, 3),
                image: Size::new(2, 2),
            }
        );
        assert!(!cmp.subscreen_equals(Rect::new(1, 1, 1, 1), 1));
    }

    #[test]
    fn off_screen_region_is_unequal() {
        let (fb, map, pool) = (framebuffer(), resources(), BitmapPool::new());
        let cmp = Comparator::new(&fb, &map, &pool);
        assert_eq!(
            cmp.diff_subscreen(Rect::new(3, 3, 2, 2), 1),
            RegionDiff::OffScreen {
                screen: Size::new(4, 4)
            }
        );
    }

    #[test]
    fn region_near_coordinate_limit_is_off_screen() {
        let mut map = ResourceMap::new(MemoryAssets::new().with_asset("wide.pbm", WIDE));
        assert!(map.map_resource("wide.pbm", 7));
        let (fb, pool) = (Framebuffer::with_size(144, 168), BitmapPool::new());
        let cmp = Comparator::new(&fb, &map, &pool);
        let near_max = Rect::new(32760, 0, 10, 1);
        assert_eq!(
            cmp.diff_subscreen(near_max, 7),
            RegionDiff::OffScreen {
                screen: Size::new(144, 168)
            }
        );
        assert!(!cmp.subscreen_equals(near_max, 7));
        assert!(!cmp.subscreen_equals(Rect::new(0, 32767, 10, 1), 7));
    }

    #[test]
    fn unmapped_resource_fails_to_load() {
        let (fb, map, pool) = (framebuffer(), resources(), BitmapPool::new());
        let cmp = Comparator::new(&fb, &map, &pool);
        assert!(!cmp.screen_equals(42));
        assert_eq!(cmp.msg_screen(42), "Could not load image from resource 42");
        assert_eq!(
            cmp.msg_subscreen(Rect::new(0, 0, 1, 1), 42),
            "Could not load image from resource 42"
        );
    }
}
