//! Pixel-level regression tests for watch graphics
//!
//! A test draws into an 8-bit [`Framebuffer`] with `embedded-graphics`, then
//! asserts on single pixels, screen regions or the whole screen. Expected
//! values are either literal [`Color`]s or reference images mapped to
//! resource ids.
//!
//! # Quick start
//!
//! ```
//! use embedded_graphics::{prelude::*, primitives::Rectangle};
//! use gfx_testing::{
//!     displays, Color, Framebuffer, MemoryAssets, Rect, ResourceMap, Runner, TestContext,
//!     TestRegistry, TestResult,
//! };
//!
//! fn red_square(fb: &mut Framebuffer, ctx: &mut TestContext<'_>) -> TestResult {
//!     ctx.map_resource("square.ppm", 1)?;
//!     ctx.set_fill_color(Color::RED);
//!     Rectangle::new(Point::new(4, 4), Size::new(2, 2))
//!         .into_styled(ctx.fill_style())
//!         .draw(fb)
//!         .ok();
//!     ctx.check_subscreen(fb, Rect::new(4, 4, 2, 2), 1)
//! }
//!
//! let store = MemoryAssets::new()
//!     .with_asset("square.ppm", b"P3 2 2 255 255 0 0 255 0 0 255 0 0 255 0 0".as_slice());
//! let mut registry = TestRegistry::new();
//! registry.register("demo", "red_square", red_square);
//!
//! let mut runner = Runner::new(&displays::BASALT, ResourceMap::new(store));
//! assert!(runner.run_all(&registry).all(|outcome| outcome.passed()));
//! ```
//!
//! # Failure diagnostics
//!
//! Checks return [`TestResult`]; the first failing one ends the test with a
//! [`Failure`] that records the calling file and line. Messages are built
//! only when a check fails.

#![warn(clippy::print_stdout)]

pub mod assert;
mod compare;
mod context;
mod framebuffer;
mod registry;
mod runner;

pub use assert::{check, check_eq, check_mem, check_ne, check_with, Failure, TestResult, WithMessage};
pub use compare::{Comparator, RegionDiff};
pub use context::TestContext;
pub use framebuffer::Framebuffer;
pub use registry::{TestFn, TestRecord, TestRegistry};
pub use runner::{artifact_name, Run, Runner, TestOutcome};

pub use gfx_resources::{
    AssetStore, Bitmap, BitmapFormat, BitmapPool, DirAssets, MemoryAssets, ResourceError,
    ResourceMap,
};
pub use gfx_types::{displays, Color, Point, Rect, ScreenSpec, Size};
