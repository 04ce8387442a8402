//! **winplace**: snap the active window to a screen half, quadrant or
//! golden-ratio split, optionally on the next monitor.
//!
//! One invocation places exactly one window and exits.  The work is split
//! into four small pieces, leaf-first:
//!
//! * [`monitor`]: which monitor holds a window, and which comes next.
//! * [`placement`]: the target rectangle and gravity for a request.
//! * [`placer`]: the clear-maximize / move / restore-maximize sequence.
//! * [`request`]: validating raw flags into a
//!   [`PlacementRequest`](request::PlacementRequest).
//!
//! # Architecture
//!
//! The core is organised around one trait, [`traits::WindowManager`], which
//! abstracts the queries and client messages exchanged with the window
//! manager so the geometry is not coupled to any display protocol.  The
//! concrete implementation lives in [`x11`] (EWMH over `x11rb`, enabled by
//! the default `x11` feature).

pub mod cli;
pub mod config;
pub mod geometry;
pub mod monitor;
pub mod placement;
pub mod placer;
pub mod request;
pub mod traits;
#[cfg(feature = "x11")]
pub mod x11;
