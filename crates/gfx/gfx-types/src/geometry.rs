//! Point, size and rectangle value types
//!
//! Coordinates are signed 16-bit, matching the device's drawing API. A [`Rect`]
//! may carry a negative width and/or height ("raw" form); [`Rect::standardize`]
//! converts it to the canonical form with non-negative extents.
//!
//! Standardization wraps at the `i16` boundary like the device's integer types
//! do. Edges ([`Rect::right`], [`Rect::bottom`]) are exact `i32` values.

use core::fmt;

use embedded_graphics::prelude::{Point as EgPoint, Size as EgSize};
use embedded_graphics::primitives::Rectangle;

/// A position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Horizontal coordinate, growing to the right
    pub x: i16,
    /// Vertical coordinate, growing downwards
    pub y: i16,
}

impl Point {
    /// Create a point.
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

impl From<Point> for EgPoint {
    fn from(p: Point) -> Self {
        EgPoint::new(i32::from(p.x), i32::from(p.y))
    }
}

/// A width/height pair. Negative components mark a flipped axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in pixels
    pub w: i16,
    /// Height in pixels
    pub h: i16,
}

impl Size {
    /// Create a size.
    pub const fn new(w: i16, h: i16) -> Self {
        Self { w, h }
    }

    /// Number of pixels covered, ignoring the sign of either axis.
    // SAFETY: both factors are at most 32_768, so the product fits in u32.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn area(self) -> u32 {
        self.w.unsigned_abs() as u32 * self.h.unsigned_abs() as u32
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({}, {})", self.w, self.h)
    }
}

/// A rectangle: an origin plus a size that may still be in raw form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Anchor point
    pub origin: Point,
    /// Extent from the anchor; either component may be negative
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from its four components.
    pub const fn new(x: i16, y: i16, w: i16, h: i16) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(w, h),
        }
    }

    /// `true` if neither extent is negative.
    pub const fn is_standard(&self) -> bool {
        self.size.w >= 0 && self.size.h >= 0
    }

    /// Canonical form of this rectangle, with non-negative width and height.
    ///
    /// A negative extent is flipped: the origin moves by the magnitude of
    /// that extent and the extent is negated. Standardizing an already
    /// standard rectangle returns it unchanged.
    ///
    /// ```
    /// use gfx_types::Rect;
    ///
    /// assert_eq!(Rect::new(0, 0, 10, -10).standardize(), Rect::new(0, 10, 10, 10));
    /// assert_eq!(Rect::new(0, 0, -10, -10).standardize(), Rect::new(10, 10, 10, 10));
    /// ```
    pub const fn standardize(self) -> Self {
        let Rect { origin, size } = self;
        match (size.w >= 0, size.h >= 0) {
            // normal
            (true, true) => self,
            // flip vertically
            (true, false) => Rect::new(
                origin.x,
                origin.y.wrapping_sub(size.h),
                size.w,
                size.h.wrapping_neg(),
            ),
            // flip horizontally
            (false, true) => Rect::new(
                origin.x.wrapping_sub(size.w),
                origin.y,
                size.w.wrapping_neg(),
                size.h,
            ),
            // flip both
            (false, false) => Rect::new(
                origin.x.wrapping_sub(size.w),
                origin.y.wrapping_sub(size.h),
                size.w.wrapping_neg(),
                size.h.wrapping_neg(),
            ),
        }
    }

    /// Geometric center of the standardized rectangle.
    ///
    /// Even extents have no exact middle pixel; the result then prefers the
    /// top and/or left one.
    pub const fn center_point(&self) -> Point {
        let r = self.standardize();
        Point::new(
            r.origin.x.wrapping_add(r.size.w.wrapping_div(2)),
            r.origin.y.wrapping_add(r.size.h.wrapping_div(2)),
        )
    }

    /// First column to the right of the standardized rectangle.
    ///
    /// Widened to `i32` so edges past `i16::MAX` stay ordered.
    // SAFETY: both operands are i16 values, so the sum fits in i32.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn right(&self) -> i32 {
        let r = self.standardize();
        r.origin.x as i32 + r.size.w as i32
    }

    /// First row below the standardized rectangle.
    // SAFETY: both operands are i16 values, so the sum fits in i32.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn bottom(&self) -> i32 {
        let r = self.standardize();
        r.origin.y as i32 + r.size.h as i32
    }

    /// `true` if `p` lies inside the standardized rectangle.
    pub const fn contains(&self, p: Point) -> bool {
        let r = self.standardize();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && (p.x as i32) < self.right()
            && (p.y as i32) < self.bottom()
    }

    /// `true` if every pixel of `other` lies inside this rectangle.
    ///
    /// Empty rectangles are contained anywhere their origin is.
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        let outer = self.standardize();
        let inner = other.standardize();
        inner.origin.x >= outer.origin.x
            && inner.origin.y >= outer.origin.y
            && inner.right() <= outer.right()
            && inner.bottom() <= outer.bottom()
    }

    /// Overlap of the two standardized rectangles, or `None` if they are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let a = self.standardize();
        let b = other.standardize();
        let left = a.origin.x.max(b.origin.x);
        let top = a.origin.y.max(b.origin.y);
        let w = a.right().min(b.right()).checked_sub(i32::from(left))?;
        let h = a.bottom().min(b.bottom()).checked_sub(i32::from(top))?;
        if w <= 0 || h <= 0 {
            return None;
        }
        Some(Rect::new(left, top, i16::try_from(w).ok()?, i16::try_from(h).ok()?))
    }

    /// The standardized rectangle as an `embedded-graphics` [`Rectangle`].
    pub fn to_rectangle(&self) -> Rectangle {
        let r = self.standardize();
        Rectangle::new(
            r.origin.into(),
            EgSize::new(u32::from(r.size.w.unsigned_abs()), u32::from(r.size.h.unsigned_abs())),
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}, {})",
            self.origin.x, self.origin.y, self.size.w, self.size.h
        )
    }
}
