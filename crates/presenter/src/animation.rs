use crate::easing::ease_out_cubic;
use std::time::Duration;
use tokio::time::Instant;

/// Where an [`AnimationState`] is in its lifecycle at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Showing the target; nothing left to animate.
    Idle,
    /// Moving from the last displayed value towards the target.
    Interpolating,
}

/// One eased transition from the last displayed value to a target.
///
/// The clock is passed in on every call, so the state is a pure function of
/// time and can be stepped deterministically in tests. The owner is expected
/// to call [`AnimationState::sample`] once per frame; `sample` records what
/// was shown so a later [`AnimationState::retarget`] starts from exactly that.
#[derive(Debug, Clone, Copy)]
pub struct AnimationState {
    from: f64,
    target: f64,
    displayed: i64,
    started_at: Instant,
    duration: Duration,
}

impl AnimationState {
    /// A state that is already showing `value` and has nothing to animate.
    pub fn settled(value: f64, duration: Duration, now: Instant) -> Self {
        Self {
            from: value,
            target: value,
            displayed: display(value),
            started_at: now,
            duration,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// The value shown by the most recent [`AnimationState::sample`].
    pub fn displayed(&self) -> i64 {
        self.displayed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Starts a new transition from the currently displayed value to `target`.
    ///
    /// Any transition in flight is discarded. Returns `false` and leaves the
    /// state untouched if `target` equals the current target or is not finite.
    pub fn retarget(&mut self, target: f64, now: Instant) -> bool {
        if !target.is_finite() || target == self.target {
            return false;
        }
        self.from = self.displayed as f64;
        self.target = target;
        self.started_at = now;
        true
    }

    /// Fraction of the transition elapsed at `now`, in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// The unrounded interpolated value at `now`. Exactly the target once the
    /// duration has elapsed.
    pub fn value_at(&self, now: Instant) -> f64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.target;
        }
        self.from + (self.target - self.from) * ease_out_cubic(progress)
    }

    /// The integer that should be on screen at `now`.
    pub fn displayed_at(&self, now: Instant) -> i64 {
        display(self.value_at(now))
    }

    pub fn phase(&self, now: Instant) -> Phase {
        if self.from == self.target || self.progress(now) >= 1.0 {
            Phase::Idle
        } else {
            Phase::Interpolating
        }
    }

    /// Computes the display value at `now` and records it as shown.
    pub fn sample(&mut self, now: Instant) -> i64 {
        self.displayed = self.displayed_at(now);
        self.displayed
    }
}

fn display(value: f64) -> i64 {
    value.round() as i64
}
