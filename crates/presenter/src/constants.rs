//! Shared timing constants for the presenter

use std::time::Duration;

/// Length of one transition from the displayed value to a new target.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(700);

/// Frame interval for smooth ~60fps updates (16ms)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
