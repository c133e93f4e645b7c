/// Cubic ease-out: fast at first, decelerating smoothly into the target.
///
/// `progress` is clamped to `[0, 1]`. The curve is monotonic, starts at 0 and
/// ends exactly at 1.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let t = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
