use std::fmt;

use crate::time::FrameTime;

use super::error::FrameError;

/// Driver lifecycle. `Disposed` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Running,
    Disposed,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Running => "running",
            LifecycleState::Disposed => "disposed",
        })
    }
}

/// Successful result of a mount attempt.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mount {
    Mounted,

    /// No drawing surface was provided; nothing was set up.
    NoSurface,
}

/// Result of one [`SceneDriver::step`](super::SceneDriver::step).
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// A frame was drawn and the next step is scheduled.
    Drawn(FrameTime),

    /// The frame failed but the loop continues.
    Skipped(FrameError),

    /// The frame failed and the loop stopped.
    Halted(FrameError),

    /// Nothing was pending (not running, static mode, halted or disposed).
    Idle,
}

impl StepOutcome {
    #[inline]
    pub fn is_drawn(&self) -> bool {
        matches!(self, StepOutcome::Drawn(_))
    }
}
