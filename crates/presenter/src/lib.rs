//! # Maalgah Animated Value Presenter
//!
//! Turns a target value that changes over time into a smoothly eased, integer
//! display value. It only observes the numbers it is given and knows nothing
//! about how they were derived.
//!
//! - `ease_out_cubic`: the interpolation curve.
//! - `AnimationState`: the pure, clock-driven transition state machine.
//! - `AnimatedValuePresenter`: a tokio task that steps an `AnimationState` once
//!   per frame and publishes the displayed value on a `watch` channel.

pub mod animation;
pub mod constants;
pub mod easing;
pub mod presenter;

pub use animation::{AnimationState, Phase};
pub use constants::{ANIMATION_DURATION, FRAME_INTERVAL};
pub use easing::ease_out_cubic;
pub use presenter::{AnimatedValuePresenter, PresenterSettings};
