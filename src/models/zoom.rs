//! Zoom engine data model: screen geometry, config snapshot and observable state.

use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 1.0;
pub const MIN_ZOOM_FACTOR: f64 = 1.5;
pub const MAX_ZOOM_FACTOR: f64 = 3.0;
pub const DEFAULT_ZOOM_FACTOR: f64 = 2.0;
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 300;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;
pub const MIN_TICK_INTERVAL_MS: u64 = 1;
pub const MAX_TICK_INTERVAL_MS: u64 = 100;

/// Physical screen size in pixels, queried once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
}

impl ScreenGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> (f64, f64) {
        (self.width as f64 * 0.5, self.height as f64 * 0.5)
    }
}

/// Snapshot of the externally configured behavior, taken when a transition starts.
///
/// The enabled flag is not part of the snapshot: it is published through the
/// engine handle so capture callbacks can flip it from another thread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub zoom_factor: f64,
    pub animation_duration_ms: u64,
    pub tick_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

/// Clamps a configured zoom factor into the supported range.
///
/// Settings are trusted internal input, so out-of-range values are pulled back
/// into `[1.5, 3.0]` instead of being rejected. Non-finite values fall back to 2x.
pub fn sanitize_zoom_factor(factor: f64) -> f64 {
    if !factor.is_finite() {
        log::warn!("sanitize_zoom_factor: non-finite factor {factor}, using default");
        return DEFAULT_ZOOM_FACTOR;
    }
    let clamped = factor.clamp(MIN_ZOOM_FACTOR, MAX_ZOOM_FACTOR);
    if clamped != factor {
        log::warn!("sanitize_zoom_factor: {factor} clamped to {clamped}");
    }
    clamped
}

/// Clamps the animation tick interval into `[1, 100]` ms.
///
/// A huge interval would park a started animation at its first frame.
pub fn sanitize_tick_interval_ms(interval_ms: u64) -> u64 {
    let clamped = interval_ms.clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS);
    if clamped != interval_ms {
        log::warn!("sanitize_tick_interval_ms: {interval_ms} clamped to {clamped}");
    }
    clamped
}

/// Observable zoom state as seen by the overlay compositor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomState {
    pub current_zoom: f64,
    pub target_zoom: f64,
    pub focal_x: f64,
    pub focal_y: f64,
    pub animating: bool,
}

impl ZoomState {
    pub fn is_zoomed(&self) -> bool {
        self.current_zoom > MIN_ZOOM
    }
}
