//! The window state machine that applies a placement.
//!
//! [`Placer`] owns a [`WindowManager`] and walks the active window through
//! a single pass of
//!
//! ```text
//! Unknown → Inspected → Cleared → Moved → Restored
//! ```
//!
//! * **Inspected** reads the active window, its type and its maximize
//!   flags.  A missing window or a window that is not purely "normal"
//!   stops the pass here and nothing is sent.
//! * **Cleared** removes the maximize flags the window *currently* has.
//!   The message is sent even when none are set.
//! * **Moved** sends the move/resize request.
//! * **Restored** adds the maximize flags the placement *wants*.  Also sent
//!   when both are false.
//!
//! Window managers ignore or distort a move on a maximized window, which
//! is why the flags are cleared first.  There is no acknowledgement or
//! rollback between the three messages.

use crate::geometry::Rect;
use crate::monitor::MonitorRegistry;
use crate::placement::{desired_maximize, PlacementCalculator, PlacementResult};
use crate::request::PlacementRequest;
use crate::traits::{MaximizeState, StateAction, WindowId, WindowManager, WindowType};
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;

/// Possible errors from the placer.
#[derive(Debug, thiserror::Error)]
pub enum PlaceError {
    /// The window manager returned an error.
    #[error("window manager error: {0}")]
    WindowManager(String),

    /// The window's center lies on no known monitor.
    #[error("no monitor contains the window at {window} ({monitors} monitor(s) known)")]
    NoMonitor { window: Rect, monitors: usize },
}

fn wm_error(e: impl fmt::Display) -> PlaceError {
    PlaceError::WindowManager(e.to_string())
}

/// How far the state machine got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Unknown,
    Inspected,
    Cleared,
    Moved,
    Restored,
}

/// Why a window was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    NoActiveWindow,
    /// The window declares at least one non-normal type.
    NotNormal(Vec<WindowType>),
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::NoActiveWindow => write!(f, "no active window"),
            Skip::NotNormal(types) => write!(f, "not a normal window ({:?})", types),
        }
    }
}

/// Everything decided about one placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementPlan {
    pub window: WindowId,
    /// Window geometry before the move, in root coordinates.
    pub geometry: Rect,
    /// Index of the monitor holding the window's center.
    pub monitor: usize,
    /// Index of the destination monitor when switching.
    pub target_monitor: Option<usize>,
    pub request: PlacementRequest,
    pub result: PlacementResult,
    pub current: MaximizeState,
    pub desired: MaximizeState,
}

/// Result of a [`Placer::place`] pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The window was left untouched.
    NotApplicable(Skip),
    /// Dry run: the plan was computed but nothing was sent.
    Planned(PlacementPlan),
    /// All three messages were sent.
    Placed(PlacementPlan),
}

/// Whether a window with these type tokens may be placed.
///
/// Every token has to be "normal"; a window that lists "normal" next to
/// anything else is rejected.  A window without any type counts as normal.
pub fn is_normal(types: &[WindowType]) -> bool {
    types.iter().all(|t| *t == WindowType::Normal)
}

/// Result of the Inspected stage.
struct Inspection {
    window: WindowId,
    current: MaximizeState,
}

/// Applies [`PlacementRequest`]s to the active window.
///
/// Generic over any [`WindowManager`], so the sequencing can be exercised
/// against a recording mock.
///
/// ```ignore
/// let wm = X11Wm::connect(None)?;
/// let mut placer = Placer::new(wm, PlacementCalculator::default());
/// placer.place(&request)?;
/// ```
pub struct Placer<W: WindowManager> {
    wm: W,
    calculator: PlacementCalculator,
    dry_run: bool,
    stage: Stage,
}

impl<W: WindowManager> Placer<W> {
    pub fn new(wm: W, calculator: PlacementCalculator) -> Self {
        Self {
            wm,
            calculator,
            dry_run: false,
            stage: Stage::Unknown,
        }
    }

    /// Stop after computing the plan instead of sending messages.
    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.dry_run = dry_run;
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn window_manager(&self) -> &W {
        &self.wm
    }

    /// Run one pass of the state machine for `request`.
    ///
    /// Returns [`Outcome::NotApplicable`] without sending anything when the
    /// window should not be placed.  A window whose center lies on no
    /// monitor is an error; no default monitor is guessed.
    pub fn place(&mut self, request: &PlacementRequest) -> Result<Outcome, PlaceError> {
        self.stage = Stage::Unknown;

        let Inspection { window, current } = match self.inspect()? {
            Ok(inspection) => inspection,
            Err(skip) => {
                warn!("leaving window alone: {}", skip);
                return Ok(Outcome::NotApplicable(skip));
            }
        };

        let plan = self.plan(window, current, request)?;
        if self.dry_run {
            info!("dry run, not sending anything");
            return Ok(Outcome::Planned(plan));
        }

        self.apply(&plan)?;
        info!(
            "placed window {:#x} at {} (gravity {:?})",
            plan.window, plan.result.target, plan.result.gravity
        );
        Ok(Outcome::Placed(plan))
    }

    //  Stages

    /// Read the active window, its type list and its maximize flags.
    fn inspect(&mut self) -> Result<Result<Inspection, Skip>, PlaceError> {
        let active = self.wm.active_window().map_err(wm_error)?;
        let Some(window) = active else {
            self.stage = Stage::Inspected;
            return Ok(Err(Skip::NoActiveWindow));
        };

        let types = self.wm.window_types(window).map_err(wm_error)?;
        if !is_normal(&types) {
            self.stage = Stage::Inspected;
            return Ok(Err(Skip::NotNormal(types)));
        }

        let current = self.wm.maximize_state(window).map_err(wm_error)?;
        if current.vertical {
            debug!("is vertically maximized");
        }
        if current.horizontal {
            debug!("is horizontally maximized");
        }
        self.stage = Stage::Inspected;
        Ok(Ok(Inspection { window, current }))
    }

    /// Resolve the monitors and compute the target geometry.
    fn plan(
        &self,
        window: WindowId,
        current: MaximizeState,
        request: &PlacementRequest,
    ) -> Result<PlacementPlan, PlaceError> {
        let geometry = self.wm.window_geometry(window).map_err(wm_error)?;
        debug!("window {:#x}: {}", window, geometry);
        let screen = self.wm.screen_geometry().map_err(wm_error)?;
        debug!("resolution: {}x{}", screen.width, screen.height);
        let workarea = self.wm.work_area().map_err(wm_error)?;
        debug!("workarea: {}", workarea);

        let registry = MonitorRegistry::new(self.wm.monitors().map_err(wm_error)?);
        debug!("screen number: {}", registry.len());
        for monitor in registry.iter() {
            debug!("  monitor {}", monitor);
        }

        let index = registry
            .find_containing(&geometry)
            .ok_or(PlaceError::NoMonitor {
                window: geometry,
                monitors: registry.len(),
            })?;
        debug!("active monitor: {}", index);
        let monitor = registry.get(index).copied().ok_or(PlaceError::NoMonitor {
            window: geometry,
            monitors: registry.len(),
        })?;

        let target_monitor = if request.switch_monitor {
            registry.next(index)
        } else {
            None
        };
        let switch_target = target_monitor.and_then(|i| registry.get(i));
        if let Some(i) = target_monitor {
            debug!("switching to monitor {}", i);
        }

        let result =
            self.calculator
                .compute(request, &monitor, &workarea, &geometry, switch_target);

        Ok(PlacementPlan {
            window,
            geometry,
            monitor: index,
            target_monitor,
            request: *request,
            result,
            current,
            desired: desired_maximize(request),
        })
    }

    /// Send clear → move → restore.
    fn apply(&mut self, plan: &PlacementPlan) -> Result<(), PlaceError> {
        self.wm
            .send_state(plan.window, StateAction::Remove, plan.current)
            .map_err(wm_error)?;
        self.stage = Stage::Cleared;

        self.wm
            .send_move_resize(plan.window, &plan.result)
            .map_err(wm_error)?;
        self.stage = Stage::Moved;

        self.wm
            .send_state(plan.window, StateAction::Add, plan.desired)
            .map_err(wm_error)?;
        self.stage = Stage::Restored;
        Ok(())
    }
}

//  Tests
