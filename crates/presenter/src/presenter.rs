use crate::animation::{AnimationState, Phase};
use crate::constants::{ANIMATION_DURATION, FRAME_INTERVAL};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Timing of the animated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterSettings {
    /// Length of one transition.
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    /// Delay between two displayed frames.
    #[serde(with = "humantime_serde")]
    pub frame_interval: Duration,
}

impl Default for PresenterSettings {
    fn default() -> Self {
        Self {
            duration: ANIMATION_DURATION,
            frame_interval: FRAME_INTERVAL,
        }
    }
}

/// Animates a single displayed integer towards whatever target it was last given.
///
/// The presenter owns one tokio task. While idle that task only waits for a
/// new target; a frame timer exists only while a transition is in flight and
/// is dropped as soon as the transition completes or is superseded. Dropping
/// the presenter (or calling [`AnimatedValuePresenter::shutdown`]) ends the
/// task, so no wake-up outlives it.
///
/// Must be created from within a tokio runtime.
#[derive(Debug)]
pub struct AnimatedValuePresenter {
    target_tx: watch::Sender<f64>,
    display_rx: watch::Receiver<i64>,
    task: Option<JoinHandle<()>>,
}

impl AnimatedValuePresenter {
    /// Spawns the frame task, initially showing `initial` with nothing to animate.
    pub fn spawn(initial: f64, settings: PresenterSettings) -> Self {
        let state = AnimationState::settled(initial, settings.duration, Instant::now());
        let (target_tx, target_rx) = watch::channel(state.target());
        let (display_tx, display_rx) = watch::channel(state.displayed());

        let task = tokio::spawn(run_frames(state, settings.frame_interval, target_rx, display_tx));

        Self {
            target_tx,
            display_rx,
            task: Some(task),
        }
    }

    /// Points the animation at a new target. A transition already in flight is
    /// restarted from whatever is currently displayed.
    pub fn set_target(&self, target: f64) {
        if !target.is_finite() {
            tracing::warn!(value = target, "Ignoring non-finite animation target.");
            return;
        }
        self.target_tx.send_if_modified(|current| {
            if *current == target {
                false
            } else {
                *current = target;
                true
            }
        });
    }

    pub fn target(&self) -> f64 {
        *self.target_tx.borrow()
    }

    /// The value currently on screen.
    pub fn displayed(&self) -> i64 {
        *self.display_rx.borrow()
    }

    /// A receiver that is notified every time the displayed value changes.
    pub fn subscribe(&self) -> watch::Receiver<i64> {
        self.display_rx.clone()
    }

    /// Stops the frame task and waits until it has been torn down.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::error!(error = %e, "Presenter task failed.");
                }
            }
        }
    }
}

impl Drop for AnimatedValuePresenter {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// The presenter's task: Idle until a target arrives, then Interpolating until
/// the transition completes, then Idle again.
async fn run_frames(
    mut state: AnimationState,
    frame_interval: Duration,
    mut target_rx: watch::Receiver<f64>,
    display_tx: watch::Sender<i64>,
) {
    // Idle: no timer, just wait for the next target.
    while target_rx.changed().await.is_ok() {
        let target = *target_rx.borrow_and_update();
        if !state.retarget(target, Instant::now()) {
            continue;
        }
        tracing::trace!(from = state.displayed(), to = target, "Animation started.");

        // Interpolating: the interval lives only inside this loop.
        let mut frames = time::interval(frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = frames.tick() => {
                    let now = Instant::now();
                    let shown = state.sample(now);
                    display_tx.send_if_modified(|current| {
                        if *current == shown {
                            false
                        } else {
                            *current = shown;
                            true
                        }
                    });
                    if state.phase(now) == Phase::Idle {
                        tracing::trace!(value = shown, "Animation settled.");
                        break;
                    }
                }
                changed = target_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    let target = *target_rx.borrow_and_update();
                    if state.retarget(target, Instant::now()) {
                        tracing::trace!(
                            from = state.displayed(),
                            to = target,
                            "Animation retargeted."
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[tokio::test(start_paused = true)]
    async fn starts_idle_on_the_initial_value() {
        let presenter = AnimatedValuePresenter::spawn(3041.28, PresenterSettings::default());
        time::sleep(ms(100)).await;
        assert_eq!(presenter.displayed(), 3041);
    }

    #[tokio::test(start_paused = true)]
    async fn converges_to_the_target_by_the_end_of_the_duration() {
        let presenter = AnimatedValuePresenter::spawn(0.0, PresenterSettings::default());
        presenter.set_target(3041.28);

        time::sleep(ms(200)).await;
        let early = presenter.displayed();
        assert!(early > 0 && early < 3041, "mid-flight value was {early}");

        time::sleep(ms(600)).await;
        assert_eq!(presenter.displayed(), 3041);
    }

    #[tokio::test(start_paused = true)]
    async fn retargeting_mid_flight_restarts_from_the_displayed_value() {
        let presenter = AnimatedValuePresenter::spawn(0.0, PresenterSettings::default());
        presenter.set_target(1000.0);

        time::sleep(ms(350)).await;
        let mid = presenter.displayed();
        assert!(mid > 500 && mid < 1000, "mid-flight value was {mid}");

        presenter.set_target(0.0);
        time::sleep(ms(20)).await;
        let after = presenter.displayed();
        // Heading down from `mid`, not from 1000 and not jumping to 0.
        assert!(after < mid && after > mid / 2, "after retarget: {after}, mid: {mid}");

        time::sleep(ms(700)).await;
        assert_eq!(presenter.displayed(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn displayed_values_never_leave_the_transition_range() {
        let presenter = AnimatedValuePresenter::spawn(100.0, PresenterSettings::default());
        let mut rx = presenter.subscribe();
        presenter.set_target(900.0);

        let mut seen = Vec::new();
        while let Ok(Ok(())) = time::timeout(ms(100), rx.changed()).await {
            seen.push(*rx.borrow_and_update());
        }

        assert!(!seen.is_empty());
        assert!(seen.iter().all(|v| (100..=900).contains(v)));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last(), Some(&900));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_releases_the_task() {
        let presenter = AnimatedValuePresenter::spawn(0.0, PresenterSettings::default());
        let mut rx = presenter.subscribe();
        presenter.set_target(500.0);
        time::sleep(ms(50)).await;

        presenter.shutdown().await;
        rx.borrow_and_update();
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_presenter_releases_the_task() {
        let presenter = AnimatedValuePresenter::spawn(0.0, PresenterSettings::default());
        let mut rx = presenter.subscribe();
        presenter.set_target(500.0);
        time::sleep(ms(50)).await;

        drop(presenter);
        rx.borrow_and_update();
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn non_finite_targets_are_ignored() {
        let presenter = AnimatedValuePresenter::spawn(10.0, PresenterSettings::default());
        presenter.set_target(f64::NAN);
        time::sleep(ms(800)).await;
        assert_eq!(presenter.target(), 10.0);
        assert_eq!(presenter.displayed(), 10);
    }
}
