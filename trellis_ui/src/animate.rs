// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-rate independent exponential smoothing.
//!
//! Every animated scalar moves by `value += (target - value) * (1 - e^(-speed * dt))`.
//! Two frames of `dt / 2` land on the same value as one frame of `dt`, so motion
//! does not depend on the frame rate.

use kurbo::Rect;

/// Fraction of the remaining distance covered after `dt` seconds at `speed`.
///
/// ```
/// use trellis_ui::animate::smoothing_factor;
/// assert_eq!(smoothing_factor(20.0, 0.0), 0.0);
/// assert!(smoothing_factor(20.0, 1.0) > 0.99);
/// ```
pub fn smoothing_factor(speed: f64, dt: f64) -> f64 {
    1.0 - (-speed * dt).exp()
}

/// Move `value` toward `target` by `factor` of the remaining distance.
pub fn approach(value: f64, target: f64, factor: f64) -> f64 {
    value + (target - value) * factor
}

/// Smooth a rectangle as the 4-vector `(x, y, width, height)`.
pub fn approach_rect(current: Rect, target: Rect, factor: f64) -> Rect {
    let origin = current.origin();
    let size = current.size();
    let target_origin = target.origin();
    let target_size = target.size();
    Rect::from_origin_size(
        (
            approach(origin.x, target_origin.x, factor),
            approach(origin.y, target_origin.y, factor),
        ),
        (
            approach(size.width, target_size.width, factor),
            approach(size.height, target_size.height, factor),
        ),
    )
}
