//! Watch Graphics Types
//!
//! Value types shared by the drawing stack and its test harness.
//!
//! # Features
//!
//! - **no_std compatible** - no allocation anywhere in this crate
//! - **Raw rectangles** - sizes may be negative until [`Rect::standardize`] is applied
//! - **Packed color** - one byte per pixel, 2 bits per ARGB channel
//! - **Display catalogue** - fixed screen sizes of every watch platform
//! - **embedded-graphics interop** - [`Color`] is a `PixelColor`
//!
//! # Example
//!
//! ```
//! use gfx_types::{displays::BASALT, Color, Point, Rect};
//!
//! let raw = Rect::new(20, 20, -10, 10);
//! assert_eq!(raw.standardize(), Rect::new(30, 20, 10, 10));
//! assert_eq!(Rect::new(0, 0, 4, 4).center_point(), Point::new(2, 2));
//!
//! assert_eq!(Color::RED.r(), 3);
//! assert_eq!(BASALT.bounds(), Rect::new(0, 0, 144, 168));
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod color;
pub mod displays;
mod geometry;

pub use color::Color;
pub use displays::{ColorDepth, DisplayShape, ScreenSpec};
pub use geometry::{Point, Rect, Size};
