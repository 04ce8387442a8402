//! The transport seam between the placement core and the display server.
//!
//! The [`Placer`](crate::placer::Placer) only depends on [`WindowManager`];
//! the X11 backend in [`x11`](crate::x11) and the recording mocks used in
//! tests are interchangeable behind it.

use crate::geometry::Rect;
use crate::placement::PlacementResult;
use serde::Serialize;

/// Opaque handle of a top-level window.
pub type WindowId = u32;

/// The `_NET_WM_WINDOW_TYPE` categories a window can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    Normal,
    Desktop,
    Dock,
    Toolbar,
    Menu,
    Utility,
    Splash,
    Dialog,
    /// Any type token the backend has no name for.
    Other,
}

/// Maximized flags of a window along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MaximizeState {
    pub vertical: bool,
    pub horizontal: bool,
}

impl MaximizeState {
    pub const NONE: MaximizeState = MaximizeState {
        vertical: false,
        horizontal: false,
    };
}

/// Whether a `_NET_WM_STATE` message adds or removes the listed states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateAction {
    Remove,
    Add,
}

impl StateAction {
    /// Value of the action field in the EWMH client message.
    pub fn wire_value(self) -> u32 {
        match self {
            StateAction::Remove => 0,
            StateAction::Add => 1,
        }
    }
}

/// Abstraction over the window manager connection.
///
/// Query methods are blocking round-trips; the two `send_*` methods queue
/// a client message for the window manager and return once it has been
/// flushed.  Nothing is acknowledged.
pub trait WindowManager {
    /// The error type produced by this backend.
    type Error: std::error::Error + Send + 'static;

    /// The currently focused window, or `None` if nothing has focus.
    fn active_window(&self) -> Result<Option<WindowId>, Self::Error>;

    /// Geometry of `window` translated to root-window coordinates.
    fn window_geometry(&self, window: WindowId) -> Result<Rect, Self::Error>;

    /// Size of the whole virtual screen.
    fn screen_geometry(&self) -> Result<Rect, Self::Error>;

    /// The screen area not reserved by panels and docks.
    fn work_area(&self) -> Result<Rect, Self::Error>;

    /// Physical monitors in enumeration order.
    fn monitors(&self) -> Result<Vec<Rect>, Self::Error>;

    /// Every type token `window` declares (possibly none).
    fn window_types(&self, window: WindowId) -> Result<Vec<WindowType>, Self::Error>;

    fn maximize_state(&self, window: WindowId) -> Result<MaximizeState, Self::Error>;

    /// Ask the window manager to add or remove the maximize flags set in
    /// `state`.  Flags that are `false` are left out of the message.
    fn send_state(
        &self,
        window: WindowId,
        action: StateAction,
        state: MaximizeState,
    ) -> Result<(), Self::Error>;

    /// Ask the window manager to move/resize `window` as described by
    /// `placement`.
    fn send_move_resize(
        &self,
        window: WindowId,
        placement: &PlacementResult,
    ) -> Result<(), Self::Error>;
}
