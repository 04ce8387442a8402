//! X11-specific implementations.
//!
//! This module provides the concrete backend for the
//! [`WindowManager`](crate::traits::WindowManager) trait, talking EWMH to
//! the running window manager and Xinerama for the monitor layout, all
//! through `x11rb`.
//!
//! Nothing outside this module should reference X11 directly.

pub mod wm;

pub use wm::{X11Error, X11Wm};
