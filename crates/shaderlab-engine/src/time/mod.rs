//! Time subsystem.
//!
//! Two clocks with different jobs:
//! - `FrameClock` advances by a fixed increment per rendered frame and feeds the
//!   `u_time` uniform. It never looks at the wall clock, so animation is
//!   deterministic per frame count.
//! - `DeltaClock` measures clamped wall-clock deltas. The pointer smoother runs
//!   on it so that smoothing speed does not depend on frame rate.

mod delta_clock;
mod frame_clock;

pub use delta_clock::DeltaClock;
pub use frame_clock::{FrameClock, FrameTime, DEFAULT_TIME_STEP};
