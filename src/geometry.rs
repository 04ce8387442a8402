//! Integer rectangles in root-window (screen) coordinates.
//!
//! A [`Rect`] describes a monitor, the workarea or a window.  The origin is
//! the top-left corner of the virtual screen and `y` grows downwards, as in
//! X11.

use serde::Serialize;
use std::fmt;

/// An axis-aligned rectangle with integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Rect {
    /// Left edge (pixels).
    pub x: i32,
    /// Top edge (pixels).
    pub y: i32,
    /// Horizontal extent (pixels).
    pub width: u32,
    /// Vertical extent (pixels).
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point, kept fractional so odd sizes do not round.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + 0.5 * self.width as f64,
            self.y as f64 + 0.5 * self.height as f64,
        )
    }

    /// Whether `(px, py)` lies inside the half-open area
    /// `[x, x + width) × [y, y + height)`.
    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        let left = self.x as f64;
        let top = self.y as f64;
        px >= left
            && px < left + self.width as f64
            && py >= top
            && py < top + self.height as f64
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} @ ({},{})", self.width, self.height, self.x, self.y)
    }
}
