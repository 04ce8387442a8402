//! Command-line interface definitions for winplace.

use crate::config::Overrides;
use crate::request::Flags;
use clap::{ArgAction, Parser};

/// Command-line interface for the `winplace` binary.
///
/// Every placement flag is counted rather than stored so that repeating a
/// flag is not a parse error; [`Cli::flags`] turns the counts back into the
/// raw [`Flags`] the request builder validates.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "winplace",
    about = "Move the active window to a screen half, quadrant or golden-ratio split",
    version
)]
pub struct Cli {
    /// Move window to the right.
    #[arg(short = 'r', long, action = ArgAction::Count)]
    pub right: u8,

    /// Move window to the left.
    #[arg(short = 'l', long, action = ArgAction::Count)]
    pub left: u8,

    /// Move window to the top.
    #[arg(short = 't', long, action = ArgAction::Count)]
    pub top: u8,

    /// Move window to the bottom.
    #[arg(short = 'b', long, action = ArgAction::Count)]
    pub bottom: u8,

    /// Without vertical or horizontal maximizing.
    #[arg(short = 'n', long, action = ArgAction::Count)]
    pub nomax: u8,

    /// Use the small part of the golden ratio.
    #[arg(short = 'g', long = "goldenratio", action = ArgAction::Count)]
    pub golden_small: u8,

    /// Use the big part of the golden ratio.
    #[arg(short = 'G', long = "Goldenratio", action = ArgAction::Count)]
    pub golden_big: u8,

    /// Move the window to the next monitor.
    #[arg(short = 'm', long = "switchmonitor", action = ArgAction::Count)]
    pub switch_monitor: u8,

    /// Print the computed placement as JSON instead of moving the window.
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Log every placement step to stderr.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Window frame border width assumed by the placement (pixels).
    #[arg(long, value_name = "PX", allow_negative_numbers = true)]
    pub border: Option<i32>,

    /// Title bar compensation assumed by the placement (pixels).
    #[arg(long, value_name = "PX", allow_negative_numbers = true)]
    pub title: Option<i32>,

    /// X display to connect to instead of `$DISPLAY`.
    #[arg(long, value_name = "DISPLAY")]
    pub display: Option<String>,
}

impl Cli {
    /// The raw placement flags.
    pub fn flags(&self) -> Flags {
        Flags {
            right: self.right > 0,
            left: self.left > 0,
            top: self.top > 0,
            bottom: self.bottom > 0,
            nomax: self.nomax > 0,
            golden_small: self.golden_small,
            golden_big: self.golden_big,
            switch_monitor: self.switch_monitor > 0,
        }
    }

    /// Settings overrides for [`Config::resolve`](crate::config::Config::resolve).
    pub fn overrides(&self) -> Overrides {
        Overrides {
            border: self.border,
            title: self.title,
            dry_run: self.dry_run,
        }
    }
}
