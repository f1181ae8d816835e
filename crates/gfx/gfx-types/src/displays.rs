//! Watch display specifications
//!
//! Every platform has a fixed screen; tests allocate a framebuffer of exactly
//! this size and the full-screen assertion compares against it.

use core::fmt;

use crate::geometry::Rect;

/// Outline of the visible panel area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DisplayShape {
    /// Rectangular panel, every framebuffer pixel visible
    Rect,
    /// Round panel inscribed in the framebuffer
    Round,
}

/// Native color depth of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ColorDepth {
    /// Black and white panel
    Mono,
    /// 64 colors (2 bits per channel)
    Color64,
}

impl fmt::Display for DisplayShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rect => "rect",
            Self::Round => "round",
        })
    }
}

impl fmt::Display for ColorDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mono => "mono",
            Self::Color64 => "64 colors",
        })
    }
}

/// Specification of a watch screen.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScreenSpec {
    /// Platform name, e.g. `"basalt"`
    pub name: &'static str,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Panel outline
    pub shape: DisplayShape,
    /// Panel color depth
    pub depth: ColorDepth,
}

impl ScreenSpec {
    /// Full-screen rectangle `(0, 0, width, height)`.
    // Catalogue dimensions are far below i16::MAX.
    #[allow(clippy::cast_possible_wrap)]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i16, self.height as i16)
    }

    /// Number of bytes in an 8-bit framebuffer for this screen.
    pub const fn framebuffer_len(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Look up a catalogue entry by (case-insensitive) platform name.
    pub fn by_name(name: &str) -> Option<&'static ScreenSpec> {
        ALL.iter()
            .copied()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
    }
}

/// Original black and white watch
pub const APLITE: ScreenSpec = ScreenSpec {
    name: "aplite",
    width: 144,
    height: 168,
    shape: DisplayShape::Rect,
    depth: ColorDepth::Mono,
};

/// First color watch
pub const BASALT: ScreenSpec = ScreenSpec {
    name: "basalt",
    width: 144,
    height: 168,
    shape: DisplayShape::Rect,
    depth: ColorDepth::Color64,
};

/// Round color watch
pub const CHALK: ScreenSpec = ScreenSpec {
    name: "chalk",
    width: 180,
    height: 180,
    shape: DisplayShape::Round,
    depth: ColorDepth::Color64,
};

/// Slim black and white watch
pub const DIORITE: ScreenSpec = ScreenSpec {
    name: "diorite",
    width: 144,
    height: 168,
    shape: DisplayShape::Rect,
    depth: ColorDepth::Mono,
};

/// Large color watch
pub const EMERY: ScreenSpec = ScreenSpec {
    name: "emery",
    width: 200,
    height: 228,
    shape: DisplayShape::Rect,
    depth: ColorDepth::Color64,
};

/// Every known display, in release order.
pub const ALL: &[&ScreenSpec] = &[&APLITE, &BASALT, &CHALK, &DIORITE, &EMERY];

#[cfg(test)]
mod tests {
    #![allow(clippy::arithmetic_side_effects, clippy::unwrap_used)]
    use super::*;

    #[test]
    fn bounds_cover_the_screen() {
        assert_eq!(BASALT.bounds(), Rect::new(0, 0, 144, 168));
        assert_eq!(BASALT.framebuffer_len(), 144 * 168);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(ScreenSpec::by_name("Chalk"), Some(&CHALK));
        assert_eq!(ScreenSpec::by_name("EMERY").map(|s| s.width), Some(200));
        assert!(ScreenSpec::by_name("unknown").is_none());
    }

    #[test]
    fn catalogue_names_are_unique() {
        for (i, a) in ALL.iter().enumerate() {
            for b in ALL.iter().skip(i + 1) {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn shape_and_depth_display() {
        assert_eq!(CHALK.shape.to_string(), "round");
        assert_eq!(APLITE.depth.to_string(), "mono");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_string(&CHALK).unwrap();
        assert!(json.contains("\"name\":\"chalk\""));
        assert!(json.contains("\"shape\":\"Round\""));
    }
}
