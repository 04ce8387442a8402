//! Placement requests and the builder that validates them.
//!
//! This module defines the vocabulary the rest of the crate shares:
//! [`PlacementRequest`] describes *where* the active window should go,
//! [`Edge`] / [`Vertical`] name the two independent axes, and
//! [`SplitFactor`] is the share of the monitor the window receives.
//!
//! Requests are only ever produced by [`RequestBuilder`], which rejects
//! contradictory option combinations with a [`UsageError`] before any
//! geometry is computed.

use serde::Serialize;
use std::fmt;

/// The larger part of the golden ratio, rounded the way the placement
/// arithmetic expects it.
pub const GOLDEN_RATIO: f64 = 0.618;

/// Horizontal placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
}

/// Vertical placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    Top,
    Bottom,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Left => write!(f, "left"),
            Edge::Right => write!(f, "right"),
        }
    }
}

impl fmt::Display for Vertical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vertical::Top => write!(f, "top"),
            Vertical::Bottom => write!(f, "bottom"),
        }
    }
}

/// Which part of the golden ratio the window should take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoldenRatio {
    /// `1 − φ` (≈ 0.382).
    Small,
    /// `φ` (≈ 0.618).
    Big,
}

/// Split factor for the golden-ratio flag `part`.
pub fn compute_factor(part: GoldenRatio) -> f64 {
    match part {
        GoldenRatio::Small => 1.0 - GOLDEN_RATIO,
        GoldenRatio::Big => GOLDEN_RATIO,
    }
}

/// Fraction of the monitor extent given to the window, always in `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SplitFactor(f64);

impl SplitFactor {
    /// An even split (`0.5`).
    pub const EVEN: SplitFactor = SplitFactor(0.5);

    pub fn golden(part: GoldenRatio) -> Self {
        SplitFactor(compute_factor(part))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for SplitFactor {
    fn default() -> Self {
        Self::EVEN
    }
}

/// A validated description of where the active window should go.
///
/// Construct one through [`RequestBuilder`] or
/// [`PlacementRequest::from_flags`]; the builder guarantees that a corner
/// request (both axes set) always has `suppress_maximize == true`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacementRequest {
    pub edge: Option<Edge>,
    pub vertical: Option<Vertical>,
    pub split: SplitFactor,
    /// Do not maximize along the axis the window is not placed on.
    pub suppress_maximize: bool,
    /// Move to the next monitor before applying `edge` / `vertical`.
    pub switch_monitor: bool,
}

impl PlacementRequest {
    /// Whether both an edge and a vertical component are set.
    pub fn is_corner(&self) -> bool {
        self.edge.is_some() && self.vertical.is_some()
    }

    /// Validate the raw command-line flags.
    pub fn from_flags(flags: &Flags) -> Result<Self, UsageError> {
        let mut builder = RequestBuilder::new();
        if flags.right {
            builder = builder.edge(Edge::Right)?;
        }
        if flags.left {
            builder = builder.edge(Edge::Left)?;
        }
        if flags.top {
            builder = builder.vertical(Vertical::Top)?;
        }
        if flags.bottom {
            builder = builder.vertical(Vertical::Bottom)?;
        }
        for _ in 0..flags.golden_small {
            builder = builder.golden(GoldenRatio::Small)?;
        }
        for _ in 0..flags.golden_big {
            builder = builder.golden(GoldenRatio::Big)?;
        }
        if flags.nomax {
            builder = builder.no_maximize();
        }
        if flags.switch_monitor {
            builder = builder.switch_monitor();
        }
        builder.build()
    }
}

/// Raw placement flags as they come off the command line.
///
/// The golden-ratio flags are occurrence counts so that repeating one of
/// them is detected as setting the split factor twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub right: bool,
    pub left: bool,
    pub top: bool,
    pub bottom: bool,
    pub nomax: bool,
    pub golden_small: u8,
    pub golden_big: u8,
    pub switch_monitor: bool,
}

/// A contradictory or empty set of placement options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("Use left or right.")]
    LeftAndRight,
    #[error("Use top or bottom.")]
    TopAndBottom,
    #[error("Use -g or -G.")]
    SplitFactorTwice,
    #[error("No placement given; use at least one of -r, -l, -t, -b or -m.")]
    NoPlacement,
}

/// Step-by-step construction of a [`PlacementRequest`].
///
/// Each setter checks the new option against what has been set so far,
/// mirroring the order in which flags appear on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilder {
    edge: Option<Edge>,
    vertical: Option<Vertical>,
    split: Option<SplitFactor>,
    suppress_maximize: bool,
    switch_monitor: bool,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the window against `edge`.  Repeating the same edge is fine;
    /// asking for the opposite one is not.
    pub fn edge(mut self, edge: Edge) -> Result<Self, UsageError> {
        match self.edge {
            Some(current) if current != edge => Err(UsageError::LeftAndRight),
            _ => {
                self.edge = Some(edge);
                Ok(self)
            }
        }
    }

    pub fn vertical(mut self, vertical: Vertical) -> Result<Self, UsageError> {
        match self.vertical {
            Some(current) if current != vertical => Err(UsageError::TopAndBottom),
            _ => {
                self.vertical = Some(vertical);
                Ok(self)
            }
        }
    }

    /// Override the even split with a golden-ratio part.  The split may
    /// only be overridden once.
    pub fn golden(mut self, part: GoldenRatio) -> Result<Self, UsageError> {
        if self.split.is_some() {
            return Err(UsageError::SplitFactorTwice);
        }
        self.split = Some(SplitFactor::golden(part));
        Ok(self)
    }

    pub fn no_maximize(mut self) -> Self {
        self.suppress_maximize = true;
        self
    }

    pub fn switch_monitor(mut self) -> Self {
        self.switch_monitor = true;
        self
    }

    /// Finish the request.
    ///
    /// Fails with [`UsageError::NoPlacement`] when neither an axis nor a
    /// monitor switch was requested.  A corner request always suppresses
    /// maximize.
    pub fn build(self) -> Result<PlacementRequest, UsageError> {
        if self.edge.is_none() && self.vertical.is_none() && !self.switch_monitor {
            return Err(UsageError::NoPlacement);
        }
        let corner = self.edge.is_some() && self.vertical.is_some();
        Ok(PlacementRequest {
            edge: self.edge,
            vertical: self.vertical,
            split: self.split.unwrap_or_default(),
            suppress_maximize: self.suppress_maximize || corner,
            switch_monitor: self.switch_monitor,
        })
    }
}
