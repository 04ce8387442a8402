//! [`WindowManager`] implementation backed by an X11 connection.
//!
//! Queries go through EWMH root and client properties
//! (`_NET_ACTIVE_WINDOW`, `_NET_WORKAREA`, `_NET_WM_WINDOW_TYPE`,
//! `_NET_WM_STATE`) and the Xinerama extension.  Changes are requested
//! from the window manager with `_NET_WM_STATE` and
//! `_NET_MOVERESIZE_WINDOW` client messages sent to the root window; the
//! window itself is never configured directly.

use crate::geometry::Rect;
use crate::placement::PlacementResult;
use crate::traits::{MaximizeState, StateAction, WindowId, WindowManager, WindowType};
use log::{debug, warn};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::errors::{ConnectError, ConnectionError, ReplyError};
use x11rb::protocol::xinerama::{self, ConnectionExt as _};
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ClientMessageEvent, ConnectionExt as _, EventMask, GetPropertyReply, Window,
};
use x11rb::rust_connection::RustConnection;

/// X11-backed window manager.
///
/// Owns the display connection; dropping the value closes it, so every
/// exit path releases the display.
pub struct X11Wm {
    conn: RustConnection,
    root: Window,
    screen: Rect,
    atoms: Atoms,
}

/// Errors that can occur when talking to the X server.
#[derive(Debug, thiserror::Error)]
pub enum X11Error {
    #[error("cannot open display: {0}")]
    Connect(#[from] ConnectError),
    #[error("X11 connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("X11 request failed: {0}")]
    Reply(#[from] ReplyError),
}

/// The EWMH atoms winplace reads or sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atoms {
    pub net_active_window: Atom,
    pub net_workarea: Atom,
    pub net_wm_state: Atom,
    pub net_wm_state_maximized_vert: Atom,
    pub net_wm_state_maximized_horz: Atom,
    pub net_moveresize_window: Atom,
    pub net_wm_window_type: Atom,
    pub net_wm_window_type_normal: Atom,
    pub net_wm_window_type_desktop: Atom,
    pub net_wm_window_type_dock: Atom,
    pub net_wm_window_type_toolbar: Atom,
    pub net_wm_window_type_menu: Atom,
    pub net_wm_window_type_utility: Atom,
    pub net_wm_window_type_splash: Atom,
    pub net_wm_window_type_dialog: Atom,
}

impl Atoms {
    /// Intern all required atoms.
    pub fn new<C: Connection>(conn: &C) -> Result<Self, X11Error> {
        let intern = |name: &str| -> Result<Atom, X11Error> {
            Ok(conn.intern_atom(false, name.as_bytes())?.reply()?.atom)
        };

        Ok(Self {
            net_active_window: intern("_NET_ACTIVE_WINDOW")?,
            net_workarea: intern("_NET_WORKAREA")?,
            net_wm_state: intern("_NET_WM_STATE")?,
            net_wm_state_maximized_vert: intern("_NET_WM_STATE_MAXIMIZED_VERT")?,
            net_wm_state_maximized_horz: intern("_NET_WM_STATE_MAXIMIZED_HORZ")?,
            net_moveresize_window: intern("_NET_MOVERESIZE_WINDOW")?,
            net_wm_window_type: intern("_NET_WM_WINDOW_TYPE")?,
            net_wm_window_type_normal: intern("_NET_WM_WINDOW_TYPE_NORMAL")?,
            net_wm_window_type_desktop: intern("_NET_WM_WINDOW_TYPE_DESKTOP")?,
            net_wm_window_type_dock: intern("_NET_WM_WINDOW_TYPE_DOCK")?,
            net_wm_window_type_toolbar: intern("_NET_WM_WINDOW_TYPE_TOOLBAR")?,
            net_wm_window_type_menu: intern("_NET_WM_WINDOW_TYPE_MENU")?,
            net_wm_window_type_utility: intern("_NET_WM_WINDOW_TYPE_UTILITY")?,
            net_wm_window_type_splash: intern("_NET_WM_WINDOW_TYPE_SPLASH")?,
            net_wm_window_type_dialog: intern("_NET_WM_WINDOW_TYPE_DIALOG")?,
        })
    }

    /// Map a `_NET_WM_WINDOW_TYPE` atom to a [`WindowType`].
    pub fn window_type(&self, atom: Atom) -> WindowType {
        match atom {
            a if a == self.net_wm_window_type_normal => WindowType::Normal,
            a if a == self.net_wm_window_type_desktop => WindowType::Desktop,
            a if a == self.net_wm_window_type_dock => WindowType::Dock,
            a if a == self.net_wm_window_type_toolbar => WindowType::Toolbar,
            a if a == self.net_wm_window_type_menu => WindowType::Menu,
            a if a == self.net_wm_window_type_utility => WindowType::Utility,
            a if a == self.net_wm_window_type_splash => WindowType::Splash,
            a if a == self.net_wm_window_type_dialog => WindowType::Dialog,
            _ => WindowType::Other,
        }
    }

    /// Maximize flags present in a `_NET_WM_STATE` atom list.
    pub fn maximize_state(&self, states: impl IntoIterator<Item = Atom>) -> MaximizeState {
        let mut state = MaximizeState::NONE;
        for atom in states {
            if atom == self.net_wm_state_maximized_vert {
                state.vertical = true;
            } else if atom == self.net_wm_state_maximized_horz {
                state.horizontal = true;
            }
        }
        state
    }

    /// Data words of a `_NET_WM_STATE` client message.  Unset flags are sent
    /// as `0` (no property).
    pub fn state_message(&self, action: StateAction, state: MaximizeState) -> [u32; 5] {
        [
            action.wire_value(),
            if state.vertical {
                self.net_wm_state_maximized_vert
            } else {
                0
            },
            if state.horizontal {
                self.net_wm_state_maximized_horz
            } else {
                0
            },
            0,
            0,
        ]
    }
}

/// Data words of a `_NET_MOVERESIZE_WINDOW` client message.
///
/// Coordinates are signed; the cast keeps their two's complement bits as
/// the protocol expects.
pub fn move_resize_message(placement: &PlacementResult) -> [u32; 5] {
    let target = placement.target;
    [
        placement.wire_flags(),
        target.x as u32,
        target.y as u32,
        target.width,
        target.height,
    ]
}

/// First desktop's entry of a `_NET_WORKAREA` value.
pub fn parse_work_area(values: &[u32]) -> Option<Rect> {
    match values {
        [x, y, width, height, ..] => Some(Rect::new(*x as i32, *y as i32, *width, *height)),
        _ => None,
    }
}

fn values32(reply: &GetPropertyReply) -> Vec<u32> {
    reply
        .value32()
        .map(|values| values.collect())
        .unwrap_or_default()
}

impl X11Wm {
    /// Open a connection to `display` (or `$DISPLAY` when `None`) and intern
    /// the atoms.
    pub fn connect(display: Option<&str>) -> Result<Self, X11Error> {
        let (conn, screen_num) = RustConnection::connect(display)?;
        let screen = &conn.setup().roots[screen_num];
        let root = screen.root;
        let screen_rect = Rect::new(
            0,
            0,
            u32::from(screen.width_in_pixels),
            u32::from(screen.height_in_pixels),
        );
        let atoms = Atoms::new(&conn)?;
        debug!("connected to screen {} ({})", screen_num, screen_rect);
        Ok(Self {
            conn,
            root,
            screen: screen_rect,
            atoms,
        })
    }

    fn property32(
        &self,
        window: Window,
        property: Atom,
        kind: AtomEnum,
    ) -> Result<Vec<u32>, X11Error> {
        let reply = self
            .conn
            .get_property(false, window, property, kind, 0, 1024)?
            .reply()?;
        Ok(values32(&reply))
    }

    /// Send a format-32 client message about `window` to the root window.
    fn send_client_message(
        &self,
        window: WindowId,
        message_type: Atom,
        data: [u32; 5],
    ) -> Result<(), X11Error> {
        let event = ClientMessageEvent::new(32, window, message_type, data);
        self.conn.send_event(
            false,
            self.root,
            EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
            event,
        )?;
        self.conn.flush()?;
        Ok(())
    }
}

//  WindowManager implementation

impl WindowManager for X11Wm {
    type Error = X11Error;

    fn active_window(&self) -> Result<Option<WindowId>, Self::Error> {
        let values = self.property32(self.root, self.atoms.net_active_window, AtomEnum::WINDOW)?;
        Ok(values.first().copied().filter(|&w| w != 0))
    }

    fn window_geometry(&self, window: WindowId) -> Result<Rect, Self::Error> {
        let geometry = self.conn.get_geometry(window)?.reply()?;
        let origin = self
            .conn
            .translate_coordinates(window, self.root, 0, 0)?
            .reply()?;
        Ok(Rect::new(
            i32::from(origin.dst_x),
            i32::from(origin.dst_y),
            u32::from(geometry.width),
            u32::from(geometry.height),
        ))
    }

    fn screen_geometry(&self) -> Result<Rect, Self::Error> {
        Ok(self.screen)
    }

    fn work_area(&self) -> Result<Rect, Self::Error> {
        let values = self.property32(self.root, self.atoms.net_workarea, AtomEnum::CARDINAL)?;
        Ok(parse_work_area(&values).unwrap_or_else(|| {
            debug!("no _NET_WORKAREA, using the screen size");
            self.screen
        }))
    }

    fn monitors(&self) -> Result<Vec<Rect>, Self::Error> {
        if self
            .conn
            .extension_information(xinerama::X11_EXTENSION_NAME)?
            .is_none()
        {
            warn!("Xinerama extension not available");
            return Ok(Vec::new());
        }
        let reply = self.conn.xinerama_query_screens()?.reply()?;
        Ok(reply
            .screen_info
            .iter()
            .map(|s| {
                Rect::new(
                    i32::from(s.x_org),
                    i32::from(s.y_org),
                    u32::from(s.width),
                    u32::from(s.height),
                )
            })
            .collect())
    }

    fn window_types(&self, window: WindowId) -> Result<Vec<WindowType>, Self::Error> {
        let atoms = self.property32(window, self.atoms.net_wm_window_type, AtomEnum::ATOM)?;
        Ok(atoms.into_iter().map(|a| self.atoms.window_type(a)).collect())
    }

    fn maximize_state(&self, window: WindowId) -> Result<MaximizeState, Self::Error> {
        let states = self.property32(window, self.atoms.net_wm_state, AtomEnum::ATOM)?;
        Ok(self.atoms.maximize_state(states))
    }

    fn send_state(
        &self,
        window: WindowId,
        action: StateAction,
        state: MaximizeState,
    ) -> Result<(), Self::Error> {
        debug!("_NET_WM_STATE {:?} {:?}", action, state);
        self.send_client_message(
            window,
            self.atoms.net_wm_state,
            self.atoms.state_message(action, state),
        )
    }

    fn send_move_resize(
        &self,
        window: WindowId,
        placement: &PlacementResult,
    ) -> Result<(), Self::Error> {
        let data = move_resize_message(placement);
        debug!("_NET_MOVERESIZE_WINDOW {:x?}", data);
        self.send_client_message(window, self.atoms.net_moveresize_window, data)
    }
}
