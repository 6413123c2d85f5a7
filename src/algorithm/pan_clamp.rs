//! Keeps the magnified field of view inside the physical screen.

use crate::models::zoom::{ScreenGeometry, MIN_ZOOM};

/// Half-size of the visible window at `zoom`, in screen pixels.
pub fn half_view_size(screen: ScreenGeometry, zoom: f64) -> (f64, f64) {
    let safe_zoom = if zoom.is_finite() {
        zoom.max(MIN_ZOOM)
    } else {
        MIN_ZOOM
    };
    (
        screen.width as f64 / (2.0 * safe_zoom),
        screen.height as f64 / (2.0 * safe_zoom),
    )
}

/// Nearest focal point to `(desired_x, desired_y)` whose magnified window stays on screen.
///
/// At zoom 1.0 the bounds collapse onto the screen center, so callers skip
/// panning entirely when not magnified.
pub fn clamp_focal(
    screen: ScreenGeometry,
    zoom: f64,
    desired_x: f64,
    desired_y: f64,
) -> (f64, f64) {
    let (half_w, half_h) = half_view_size(screen, zoom);
    let width = screen.width as f64;
    let height = screen.height as f64;
    (
        clamp_axis(desired_x, half_w, width - half_w),
        clamp_axis(desired_y, half_h, height - half_h),
    )
}

fn clamp_axis(value: f64, low: f64, high: f64) -> f64 {
    if value.is_nan() {
        return (low + high) * 0.5;
    }
    low.max(high.min(value))
}
