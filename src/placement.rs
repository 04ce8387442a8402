//! Target geometry for a [`PlacementRequest`].
//!
//! [`PlacementCalculator::compute`] is pure: given the same request,
//! monitor, workarea and window it always produces the same
//! [`PlacementResult`].  The result carries the target rectangle, the
//! [`Gravity`] anchor and the set of [`MoveResizeFields`] the window manager
//! should apply.  The two are only packed into one flag word by
//! [`PlacementResult::wire_flags`] at the transport boundary.
//!
//! # Arithmetic
//!
//! For split factor `f` on reference monitor `A` and decoration offsets
//! `border` / `title`:
//!
//! | value          | formula                                   |
//! |----------------|-------------------------------------------|
//! | width          | `A.w · f − 4·border + 2`                  |
//! | height         | `A.h · f − 2·border − 2·title`            |
//! | x for *right*  | `A.x + A.w · (1 − f) + 3·border`          |
//! | y for *bottom* | `A.y + A.h · (1 − f) + 2·border + 2·title` |
//!
//! Every value is computed in floating point and truncated toward zero.
//! Only the monitor rectangle enters the formulas; reserved panel space
//! (the workarea) is left to the window manager.
//! The offsets compensate for the frame the window manager draws around
//! the client so the visible edge lands flush with the screen edge.

use crate::geometry::Rect;
use crate::request::{Edge, PlacementRequest, Vertical};
use crate::traits::MaximizeState;
use log::debug;
use serde::Serialize;

/// Window-manager frame thickness assumed by the placement arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decoration {
    /// Frame border width (pixels).  Default: `2`.
    pub border: i32,
    /// Title bar compensation (pixels).  Default: `13`.
    pub title: i32,
}

impl Default for Decoration {
    fn default() -> Self {
        Self {
            border: 2,
            title: 13,
        }
    }
}

/// X11 window gravity, with the protocol values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gravity {
    NorthWest = 1,
    North = 2,
    NorthEast = 3,
    West = 4,
    Center = 5,
    East = 6,
    SouthWest = 7,
    South = 8,
    SouthEast = 9,
    /// Neutral anchor: keep the window's reference point where it is.
    Static = 10,
}

impl Gravity {
    /// Combine the two axes into one anchor.
    pub fn from_axes(edge: Option<Edge>, vertical: Option<Vertical>) -> Self {
        match (vertical, edge) {
            (None, None) => Gravity::Static,
            (None, Some(Edge::Left)) => Gravity::West,
            (None, Some(Edge::Right)) => Gravity::East,
            (Some(Vertical::Top), None) => Gravity::North,
            (Some(Vertical::Top), Some(Edge::Left)) => Gravity::NorthWest,
            (Some(Vertical::Top), Some(Edge::Right)) => Gravity::NorthEast,
            (Some(Vertical::Bottom), None) => Gravity::South,
            (Some(Vertical::Bottom), Some(Edge::Left)) => Gravity::SouthWest,
            (Some(Vertical::Bottom), Some(Edge::Right)) => Gravity::SouthEast,
        }
    }

    pub fn wire_value(self) -> u32 {
        self as u32
    }
}

/// Which parts of the target rectangle the move/resize request applies.
/// Fields left unset keep the window's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MoveResizeFields {
    pub x: bool,
    pub y: bool,
    pub width: bool,
    pub height: bool,
}

impl MoveResizeFields {
    /// `_NET_MOVERESIZE_WINDOW` presence bits (8–11).
    pub fn wire_bits(self) -> u32 {
        let mut bits = 0;
        if self.x {
            bits |= 1 << 8;
        }
        if self.y {
            bits |= 1 << 9;
        }
        if self.width {
            bits |= 1 << 10;
        }
        if self.height {
            bits |= 1 << 11;
        }
        bits
    }

    pub fn is_empty(self) -> bool {
        !(self.x || self.y || self.width || self.height)
    }
}

/// Geometry to hand to the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacementResult {
    pub target: Rect,
    pub gravity: Gravity,
    pub fields: MoveResizeFields,
}

impl PlacementResult {
    /// The first data word of a `_NET_MOVERESIZE_WINDOW` message: gravity in
    /// the low byte, field presence in bits 8–11, source indication 0.
    pub fn wire_flags(&self) -> u32 {
        self.gravity.wire_value() | self.fields.wire_bits()
    }
}

/// Maximize flags to restore after the move.
///
/// A window placed against a side edge is maximized vertically, one placed
/// against the top or bottom horizontally, unless suppressed.  Corner
/// requests are always suppressed by the builder, so they never maximize.
pub fn desired_maximize(request: &PlacementRequest) -> MaximizeState {
    let allow = !request.suppress_maximize;
    MaximizeState {
        vertical: allow && request.edge.is_some(),
        horizontal: allow && request.vertical.is_some(),
    }
}

/// Scale `window` linearly from the extent of `from` to the extent of `to`.
///
/// The scaling is applied to the absolute coordinates, not to the offset
/// within the monitor.
pub fn rescale(window: &Rect, from: &Rect, to: &Rect) -> Rect {
    let sx = ratio(to.width, from.width);
    let sy = ratio(to.height, from.height);
    Rect {
        x: (window.x as f64 * sx) as i32,
        y: (window.y as f64 * sy) as i32,
        width: (window.width as f64 * sx) as u32,
        height: (window.height as f64 * sy) as u32,
    }
}

fn ratio(to: u32, from: u32) -> f64 {
    if from == 0 {
        1.0
    } else {
        to as f64 / from as f64
    }
}

/// Computes [`PlacementResult`]s for a fixed [`Decoration`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementCalculator {
    decoration: Decoration,
}

impl PlacementCalculator {
    pub fn new(decoration: Decoration) -> Self {
        Self { decoration }
    }

    pub fn decoration(&self) -> Decoration {
        self.decoration
    }

    /// Compute where `window`, currently on `monitor`, should go.
    ///
    /// When `switch_target` is given the window is first rescaled onto that
    /// monitor, which then replaces `monitor` as the reference for the edge
    /// arithmetic.  `workarea` is only logged; it never changes the target.
    pub fn compute(
        &self,
        request: &PlacementRequest,
        monitor: &Rect,
        workarea: &Rect,
        window: &Rect,
        switch_target: Option<&Rect>,
    ) -> PlacementResult {
        let (window, reference) = match switch_target {
            Some(target) => (rescale(window, monitor, target), target),
            None => (*window, monitor),
        };
        let area = *reference;
        debug!("reference monitor: {} (workarea {})", area, workarea);

        let f = request.split.value();
        let border = f64::from(self.decoration.border);
        let title = f64::from(self.decoration.title);
        let (ax, ay) = (f64::from(area.x), f64::from(area.y));
        let (aw, ah) = (f64::from(area.width), f64::from(area.height));

        let mut target = window;
        if let Some(edge) = request.edge {
            target.width = extent(aw * f - 4.0 * border + 2.0);
            target.x = match edge {
                Edge::Left => area.x,
                Edge::Right => (ax + aw * (1.0 - f) + 3.0 * border) as i32,
            };
        }
        if let Some(vertical) = request.vertical {
            target.height = extent(ah * f - 2.0 * border - 2.0 * title);
            target.y = match vertical {
                Vertical::Top => area.y,
                Vertical::Bottom => (ay + ah * (1.0 - f) + 2.0 * border + 2.0 * title) as i32,
            };
        }

        let fields = MoveResizeFields {
            x: request.edge.is_some(),
            width: request.edge.is_some(),
            y: request.vertical.is_some(),
            height: request.vertical.is_some(),
        };
        let result = PlacementResult {
            target,
            gravity: Gravity::from_axes(request.edge, request.vertical),
            fields,
        };
        debug!("flags: {:#x}", result.wire_flags());
        result
    }
}

/// Truncate a computed size; the window manager rejects zero-sized windows.
fn extent(value: f64) -> u32 {
    (value as i64).max(1) as u32
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Flags, GoldenRatio, RequestBuilder};

    const FULL_HD: Rect = Rect::new(0, 0, 1920, 1080);

    fn request(flags: Flags) -> PlacementRequest {
        PlacementRequest::from_flags(&flags).unwrap()
    }

    fn calc() -> PlacementCalculator {
        PlacementCalculator::new(Decoration::default())
    }

    fn window() -> Rect {
        Rect::new(100, 100, 200, 200)
    }

    #[test]
    fn right_half_of_full_hd() {
        let req = request(Flags {
            right: true,
            ..Flags::default()
        });
        let r = calc().compute(&req, &FULL_HD, &FULL_HD, &window(), None);
        assert_eq!(r.target.width, 954);
        assert_eq!(r.target.x, 966);
        assert_eq!(r.gravity, Gravity::East);
        assert!(r.fields.x && r.fields.width);
        assert!(!r.fields.y && !r.fields.height);
        // untouched axis keeps the window's values
        assert_eq!(r.target.y, 100);
        assert_eq!(r.target.height, 200);
    }

    #[test]
    fn right_half_maximizes_vertically_only() {
        let req = request(Flags {
            right: true,
            ..Flags::default()
        });
        assert_eq!(
            desired_maximize(&req),
            MaximizeState {
                vertical: true,
                horizontal: false
            }
        );
    }

    #[test]
    fn nomax_suppresses_maximize_but_not_geometry() {
        let plain = request(Flags {
            right: true,
            ..Flags::default()
        });
        let nomax = request(Flags {
            right: true,
            nomax: true,
            ..Flags::default()
        });
        assert_eq!(desired_maximize(&nomax), MaximizeState::NONE);
        let a = calc().compute(&plain, &FULL_HD, &FULL_HD, &window(), None);
        let b = calc().compute(&nomax, &FULL_HD, &FULL_HD, &window(), None);
        assert_eq!(a, b);
    }

    #[test]
    fn left_half_anchors_west_at_monitor_origin() {
        let monitor = Rect::new(1920, 0, 1920, 1080);
        let req = request(Flags {
            left: true,
            ..Flags::default()
        });
        let w = Rect::new(2000, 50, 300, 300);
        let r = calc().compute(&req, &monitor, &monitor, &w, None);
        assert_eq!(r.target.x, 1920);
        assert_eq!(r.target.width, 954);
        assert_eq!(r.gravity, Gravity::West);
    }

    #[test]
    fn top_and_bottom_halves() {
        let top = request(Flags {
            top: true,
            ..Flags::default()
        });
        let r = calc().compute(&top, &FULL_HD, &FULL_HD, &window(), None);
        assert_eq!(r.target.y, 0);
        // 540 - 4 - 26
        assert_eq!(r.target.height, 510);
        assert_eq!(r.gravity, Gravity::North);
        assert!(r.fields.y && r.fields.height && !r.fields.x && !r.fields.width);
        assert_eq!(
            desired_maximize(&top),
            MaximizeState {
                vertical: false,
                horizontal: true
            }
        );

        let bottom = request(Flags {
            bottom: true,
            ..Flags::default()
        });
        let r = calc().compute(&bottom, &FULL_HD, &FULL_HD, &window(), None);
        // 540 + 4 + 26
        assert_eq!(r.target.y, 570);
        assert_eq!(r.gravity, Gravity::South);
    }

    #[test]
    fn top_left_corner() {
        let req = request(Flags {
            top: true,
            left: true,
            ..Flags::default()
        });
        assert!(req.suppress_maximize);
        let r = calc().compute(&req, &FULL_HD, &FULL_HD, &window(), None);
        assert_eq!(r.gravity, Gravity::NorthWest);
        assert_eq!(r.target, Rect::new(0, 0, 954, 510));
        assert_eq!(desired_maximize(&req), MaximizeState::NONE);
    }

    #[test]
    fn corner_gravities() {
        assert_eq!(
            Gravity::from_axes(Some(Edge::Right), Some(Vertical::Top)),
            Gravity::NorthEast
        );
        assert_eq!(
            Gravity::from_axes(Some(Edge::Left), Some(Vertical::Bottom)),
            Gravity::SouthWest
        );
        assert_eq!(
            Gravity::from_axes(Some(Edge::Right), Some(Vertical::Bottom)),
            Gravity::SouthEast
        );
        assert_eq!(Gravity::from_axes(None, None), Gravity::Static);
    }

    #[test]
    fn corner_never_maximizes_even_if_built_by_hand() {
        let req = RequestBuilder::new()
            .edge(Edge::Right)
            .unwrap()
            .vertical(Vertical::Bottom)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(desired_maximize(&req), MaximizeState::NONE);
    }

    #[test]
    fn golden_ratio_right() {
        let req = request(Flags {
            right: true,
            golden_big: 1,
            ..Flags::default()
        });
        let r = calc().compute(&req, &FULL_HD, &FULL_HD, &window(), None);
        // 1920 * 0.618 = 1186.56 -> 1186.56 - 8 + 2
        assert_eq!(r.target.width, 1180);
        // 1920 * 0.382 = 733.44 -> + 6
        assert_eq!(r.target.x, 739);

        let small = request(Flags {
            left: true,
            golden_small: 1,
            ..Flags::default()
        });
        let r = calc().compute(&small, &FULL_HD, &FULL_HD, &window(), None);
        // 733.44 - 8 + 2
        assert_eq!(r.target.width, 727);
        assert_eq!(r.target.x, 0);
    }

    #[test]
    fn switch_monitor_alone_rescales_window() {
        let req = request(Flags {
            switch_monitor: true,
            ..Flags::default()
        });
        let dst = Rect::new(1920, 0, 1280, 1024);
        let screen = Rect::new(0, 0, 3200, 1080);
        let r = calc().compute(&req, &FULL_HD, &screen, &window(), Some(&dst));
        // 66.6, 94.8, 133.3, 189.6 truncated
        assert_eq!(r.target, Rect::new(66, 94, 133, 189));
        assert_eq!(r.gravity, Gravity::Static);
        assert!(r.fields.is_empty());
        assert_eq!(r.wire_flags(), 10);
    }

    #[test]
    fn switch_monitor_with_edge_uses_destination_geometry() {
        let req = request(Flags {
            right: true,
            switch_monitor: true,
            ..Flags::default()
        });
        let dst = Rect::new(1920, 0, 1280, 1024);
        let screen = Rect::new(0, 0, 3200, 1080);
        let r = calc().compute(&req, &FULL_HD, &screen, &window(), Some(&dst));
        // 1920 + 640 + 6
        assert_eq!(r.target.x, 2566);
        // 640 - 8 + 2
        assert_eq!(r.target.width, 634);
        // vertical axis untouched: rescaled y / height
        assert_eq!(r.target.y, 94);
        assert_eq!(r.target.height, 189);
        assert_eq!(r.gravity, Gravity::East);
    }

    #[test]
    fn panel_workarea_does_not_change_target() {
        // 30px panel along the bottom edge
        let workarea = Rect::new(0, 0, 1920, 1050);
        let req = request(Flags {
            bottom: true,
            ..Flags::default()
        });
        let r = calc().compute(&req, &FULL_HD, &workarea, &window(), None);
        // 540 + 4 + 26
        assert_eq!(r.target.y, 570);
        // 540 - 4 - 26
        assert_eq!(r.target.height, 510);
        assert_eq!(r, calc().compute(&req, &FULL_HD, &FULL_HD, &window(), None));
    }

    #[test]
    fn workarea_is_ignored_on_the_destination_monitor() {
        let dst = Rect::new(1920, 0, 1280, 1024);
        let workarea = Rect::new(0, 30, 3200, 994);
        let req = request(Flags {
            left: true,
            top: true,
            switch_monitor: true,
            ..Flags::default()
        });
        let r = calc().compute(&req, &FULL_HD, &workarea, &window(), Some(&dst));
        assert_eq!(r.target.x, 1920);
        assert_eq!(r.target.y, 0);
        // 640 - 8 + 2
        assert_eq!(r.target.width, 634);
        // 512 - 4 - 26
        assert_eq!(r.target.height, 482);
    }

    #[test]
    fn custom_decoration() {
        let calc = PlacementCalculator::new(Decoration {
            border: 0,
            title: 0,
        });
        let req = request(Flags {
            right: true,
            bottom: true,
            ..Flags::default()
        });
        let r = calc.compute(&req, &FULL_HD, &FULL_HD, &window(), None);
        assert_eq!(r.target, Rect::new(960, 540, 962, 540));
        assert_eq!(r.gravity, Gravity::SouthEast);
    }

    #[test]
    fn compute_is_idempotent() {
        let req = request(Flags {
            left: true,
            golden_small: 1,
            ..Flags::default()
        });
        let first = calc().compute(&req, &FULL_HD, &FULL_HD, &window(), None);
        let second = calc().compute(&req, &FULL_HD, &FULL_HD, &first.target, None);
        assert_eq!(first.target, second.target);
    }

    #[test]
    fn wire_flags_pack_gravity_and_fields() {
        let r = PlacementResult {
            target: FULL_HD,
            gravity: Gravity::NorthEast,
            fields: MoveResizeFields {
                x: true,
                y: true,
                width: true,
                height: true,
            },
        };
        assert_eq!(r.wire_flags(), 0xf03);

        let east = PlacementResult {
            target: FULL_HD,
            gravity: Gravity::East,
            fields: MoveResizeFields {
                x: true,
                width: true,
                ..MoveResizeFields::default()
            },
        };
        assert_eq!(east.wire_flags(), 0x506);
    }

    #[test]
    fn rescale_with_zero_sized_source_keeps_values() {
        let w = Rect::new(10, 20, 30, 40);
        let out = rescale(&w, &Rect::new(0, 0, 0, 0), &FULL_HD);
        assert_eq!(out, w);
    }

    #[test]
    fn tiny_area_never_yields_zero_size() {
        let tiny = Rect::new(0, 0, 4, 4);
        let req = request(Flags {
            left: true,
            top: true,
            ..Flags::default()
        });
        let r = calc().compute(&req, &tiny, &tiny, &Rect::new(0, 0, 2, 2), None);
        assert_eq!(r.target.width, 1);
        assert_eq!(r.target.height, 1);
    }

    #[test]
    fn split_factor_stays_in_unit_interval() {
        for part in [GoldenRatio::Small, GoldenRatio::Big] {
            let f = crate::request::compute_factor(part);
            assert!(f > 0.0 && f < 1.0);
        }
    }
}
